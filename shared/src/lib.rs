//! Shared types for the tea shop platform
//!
//! Domain models, the unified error system and small utilities used by the
//! API server and its tests.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
pub use types::PaginatedResponse;
