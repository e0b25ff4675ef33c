//! Order API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | POST | none (user optional) |
//! | /api/orders/preview | POST | none (user optional) |
//! | /api/orders/track | GET | none (code + phone) |
//! | /api/orders/mine | GET | user |
//! | /api/orders/{id}/cancel | POST | user (owner) |
//! | /api/orders | GET | orders:manage |
//! | /api/orders/{id} | GET | orders:manage |
//! | /api/orders/{id}/status | PUT | orders:manage |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let customer_routes = Router::new()
        .route("/", post(handler::checkout))
        .route("/preview", post(handler::preview))
        .route("/track", get(handler::track))
        .route("/mine", get(handler::my_orders))
        .route("/{id}/cancel", post(handler::cancel));

    let manage_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_permission("orders:manage")));

    customer_routes.merge(manage_routes)
}
