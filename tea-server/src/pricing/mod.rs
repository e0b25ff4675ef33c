//! Pricing rules
//!
//! - [`discount`] - coupon eligibility and amounts
//! - [`shipping`] - flat fee / free shipping threshold

pub mod discount;
pub mod shipping;

pub use discount::{DiscountOutcome, apply_discount, check_eligibility};
pub use shipping::calculate_shipping_fee;
