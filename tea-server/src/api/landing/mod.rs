//! Landing page sections
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/landing | GET | none (visible only) |
//! | /api/landing/{key} | GET | none |
//! | /api/admin/landing | GET | content:manage |
//! | /api/admin/landing/{key} | PUT, DELETE | content:manage |

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/api/landing", get(handler::list_visible))
        .route("/api/landing/{key}", get(handler::get_visible));

    let manage_routes = Router::new()
        .route("/api/admin/landing", get(handler::list_all))
        .route(
            "/api/admin/landing/{key}",
            get(handler::get_any).put(handler::upsert).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission("content:manage")));

    public_routes.merge(manage_routes)
}
