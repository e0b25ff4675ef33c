//! Discount API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/discounts/apply | POST | none (user optional) |
//! | /api/discounts | GET, POST | discounts:manage |
//! | /api/discounts/{id} | GET, PUT, DELETE | discounts:manage |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/discounts", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/apply", post(handler::apply));

    let manage_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission("discounts:manage")));

    public_routes.merge(manage_routes)
}
