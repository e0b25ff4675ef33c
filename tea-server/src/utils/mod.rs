//! Utilities - shared helpers and types
//!
//! - [`AppError`] / [`ErrorBody`] - unified error types (from `shared::error`)
//! - [`extract`] - `Json` / `Query` / `Path` extractors rejecting with `AppError`
//! - logging setup, input validation, pagination, money helpers

pub mod error;
pub mod extract;
pub mod logger;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
