//! Category API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/categories | GET | none |
//! | /api/categories/{id} | GET | none |
//! | /api/categories | POST | catalog:manage |
//! | /api/categories/{id} | PUT, DELETE | catalog:manage |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission("catalog:manage")));

    read_routes.merge(manage_routes)
}
