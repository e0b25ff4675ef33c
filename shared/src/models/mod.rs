//! Data models
//!
//! Shared between the API server and its clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps Unix millis.

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

// Re-exports
pub use address::*;
pub use blog::*;
pub use cart::*;
pub use category::*;
pub use company_info::*;
pub use dashboard::*;
pub use discount::*;
pub use landing::*;
pub use order::*;
pub use product::*;
pub use ship_config::*;
pub use user::*;
