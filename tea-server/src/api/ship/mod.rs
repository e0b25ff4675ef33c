//! Shipping config API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/ship/active | GET | none |
//! | /api/ship/calculate-fee | POST | none |
//! | /api/ship | GET, POST | settings:manage |
//! | /api/ship/{id} | GET, PUT, DELETE | settings:manage |
//! | /api/ship/{id}/activate | PUT | settings:manage |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/ship", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/active", get(handler::get_active))
        .route("/calculate-fee", post(handler::calculate_fee));

    let manage_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/activate", put(handler::activate))
        .layer(middleware::from_fn(require_permission("settings:manage")));

    public_routes.merge(manage_routes)
}
