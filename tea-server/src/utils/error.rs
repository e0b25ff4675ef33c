//! Unified error handling
//!
//! Re-exports the shared error system so handlers only import `crate::utils`.
//!
//! ```ignore
//! // Return an error
//! Err(AppError::new(ErrorCode::OrderNotFound))
//!
//! // Return a resource
//! Ok(Json(order))
//! ```

pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};

