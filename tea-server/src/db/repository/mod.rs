//! Repository Module
//!
//! Free functions over `&SqlitePool` (or an open transaction), one module per table group.

pub mod address;
pub mod blog;
pub mod cart;
pub mod category;
pub mod company_info;
pub mod dashboard;
pub mod discount;
pub mod landing;
pub mod order;
pub mod product;
pub mod ship_config;
pub mod user;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A business rule failed inside a query or transaction
    #[error("{1}")]
    Rule(ErrorCode, String),
}

impl RepoError {
    /// Turn a unique-constraint failure into a domain specific conflict
    pub fn on_duplicate(self, code: ErrorCode, message: impl Into<String>) -> Self {
        match self {
            RepoError::Duplicate(_) => RepoError::Rule(code, message.into()),
            other => other,
        }
    }

    pub fn rule(code: ErrorCode) -> Self {
        RepoError::Rule(code, code.message().to_string())
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();
                if db_err.is_unique_violation() {
                    RepoError::Duplicate(msg)
                } else if db_err.is_check_violation() {
                    RepoError::Validation(msg)
                } else {
                    RepoError::Database(msg)
                }
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Rule(code, msg) => AppError::with_message(code, msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// `%term%` for LIKE filters, `None` for blank input
///
/// Wildcards in the term are escaped with `\`; queries pair this with
/// `LIKE ? ESCAPE '\'`.
pub(crate) fn like_pattern(term: Option<&str>) -> Option<String> {
    term.map(str::trim).filter(|t| !t.is_empty()).map(|t| {
        let escaped = t.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        format!("%{escaped}%")
    })
}
