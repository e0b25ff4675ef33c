//! Product (SPU) and SKU API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/products | GET | none |
//! | /api/products/{id} | GET | none |
//! | /api/products/slug/{slug} | GET | none |
//! | /api/products | POST | catalog:manage |
//! | /api/products/{id} | PUT, DELETE | catalog:manage |
//! | /api/products/{id}/skus | POST | catalog:manage |
//! | /api/skus/{id} | PUT, DELETE | catalog:manage |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/skus", sku_routes())
}

fn product_routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/slug/{slug}", get(handler::get_by_slug));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/skus", post(handler::create_sku))
        .layer(middleware::from_fn(require_permission("catalog:manage")));

    read_routes.merge(manage_routes)
}

fn sku_routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", put(handler::update_sku).delete(handler::delete_sku))
        .layer(middleware::from_fn(require_permission("catalog:manage")))
}
