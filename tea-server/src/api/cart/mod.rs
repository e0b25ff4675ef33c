//! Cart API (logged-in users)
//!
//! | Path | Method |
//! |------|--------|
//! | /api/cart | GET, DELETE |
//! | /api/cart/items | POST |
//! | /api/cart/items/{sku_id} | PUT, DELETE |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart).delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route("/items/{sku_id}", put(handler::update_item).delete(handler::remove_item))
}
