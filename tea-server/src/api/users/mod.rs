//! Admin user management
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/users | GET | admin |
//! | /api/admin/users/{id} | GET, PUT | admin |

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .layer(middleware::from_fn(require_admin))
}
