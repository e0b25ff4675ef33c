//! Authentication API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/auth/register | POST | none (rate limited) |
//! | /api/auth/login | POST | none (rate limited) |
//! | /api/auth/logout | POST | none |
//! | /api/auth/me | GET | user |
//! | /api/auth/password | PUT | user |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{login_rate_limit, register_rate_limit};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/auth", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let login = Router::new()
        .route("/login", post(handler::login))
        .route_layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));

    let register = Router::new()
        .route("/register", post(handler::register))
        .route_layer(middleware::from_fn_with_state(state.clone(), register_rate_limit));

    Router::new()
        .route("/logout", post(handler::logout))
        .route("/me", get(handler::me))
        .route("/password", put(handler::change_password))
        .merge(login)
        .merge(register)
}
