//! Dashboard API
//!
//! | Path | Method |
//! |------|--------|
//! | /api/dashboard/summary | GET |
//! | /api/dashboard/revenue-chart | GET |
//! | /api/dashboard/top-products | GET |
//! | /api/dashboard/recent-orders | GET |
//! | /api/dashboard/order-status | GET |
//!
//! All routes require `dashboard:view`.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/dashboard", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/summary", get(handler::summary))
        .route("/revenue-chart", get(handler::revenue_chart))
        .route("/top-products", get(handler::top_products))
        .route("/recent-orders", get(handler::recent_orders))
        .route("/order-status", get(handler::order_status))
        .layer(middleware::from_fn(require_permission("dashboard:view")))
}
