//! API routes
//!
//! One folder per resource: `mod.rs` declares the router, `handler.rs` the handlers.
//!
//! - [`health`] - liveness and database check
//! - [`auth`] - register, login, logout, profile, password
//! - [`users`] - admin user management
//! - [`categories`] / [`products`] - catalog (products also own SKU routes)
//! - [`cart`] - server-side cart
//! - [`orders`] - checkout, tracking, order management
//! - [`discounts`] - coupon management and application
//! - [`ship`] - shipping configs and fee quotes
//! - [`company_info`] - company singleton
//! - [`address`] - province / district / ward lookup
//! - [`blogs`] - public posts and admin editing
//! - [`landing`] - landing page sections
//! - [`dashboard`] - back office reporting

pub mod address;
pub mod auth;
pub mod blogs;
pub mod cart;
pub mod categories;
pub mod company_info;
pub mod dashboard;
pub mod discounts;
pub mod health;
pub mod landing;
pub mod orders;
pub mod products;
pub mod ship;
pub mod users;

pub use crate::utils::AppResult;
