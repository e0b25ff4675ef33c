//! Blog API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/blogs | GET | none (published) |
//! | /api/blogs/{slug} | GET | none (counts a view) |
//! | /api/admin/blogs | GET, POST | blogs:manage |
//! | /api/admin/blogs/{id} | GET, PUT, DELETE | blogs:manage |

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/api/blogs", get(handler::list_published))
        .route("/api/blogs/{slug}", get(handler::view));

    let manage_routes = Router::new()
        .route("/api/admin/blogs", get(handler::list_all).post(handler::create))
        .route(
            "/api/admin/blogs/{id}",
            get(handler::get_by_id).put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission("blogs:manage")));

    public_routes.merge(manage_routes)
}
