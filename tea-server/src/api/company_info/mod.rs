//! Company info API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/company-info | GET | none |
//! | /api/company-info | PUT | settings:manage |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new().route("/api/company-info", get(handler::get));

    let manage_routes = Router::new()
        .route("/api/company-info", put(handler::update))
        .layer(middleware::from_fn(require_permission("settings:manage")));

    read_routes.merge(manage_routes)
}
