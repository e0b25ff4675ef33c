//! Order workflows
//!
//! - [`checkout`] - quote and place orders (stock, coupon and cart in one transaction)
//! - [`lifecycle`] - status transitions and cancellation

pub mod checkout;
pub mod lifecycle;

pub use checkout::{CheckoutSource, place_order, preview_order};
pub use lifecycle::{cancel_by_customer, change_status, load_detail};
