//! Address lookup
//!
//! | Path | Method |
//! |------|--------|
//! | /api/address/provinces | GET |
//! | /api/address/provinces/{code}/districts | GET |
//! | /api/address/districts/{code}/wards | GET |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/address", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/provinces", get(handler::provinces))
        .route("/provinces/{code}/districts", get(handler::districts))
        .route("/districts/{code}/wards", get(handler::wards))
}
