//! Router assembly
//!
//! [`build_router`] registers every resource router; [`build_app`] wraps it in
//! the middleware stack used by both the HTTP server and the integration tests.

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue, Method};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::auth::require_auth;
use crate::core::ServerState;

pub mod middleware;

const REQUEST_ID: &str = "x-request-id";

/// UUID v4 request ids
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Every route, without the global middleware stack.
///
/// `state` is only used for route layers that need it (rate limiting).
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::auth::router(state))
        .merge(api::users::router())
        .merge(api::categories::router())
        .merge(api::products::router())
        .merge(api::cart::router())
        .merge(api::orders::router())
        .merge(api::discounts::router())
        .merge(api::ship::router())
        .merge(api::company_info::router())
        .merge(api::address::router())
        .merge(api::blogs::router())
        .merge(api::landing::router())
        .merge(api::dashboard::router())
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allowed = origin.and_then(|o| HeaderValue::from_str(o).ok());
    match allowed {
        Some(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                http::header::CONTENT_TYPE,
                http::header::AUTHORIZATION,
                HeaderName::from_static(REQUEST_ID),
            ]),
        None => CorsLayer::permissive(),
    }
}

/// The application with its full middleware stack (state still to be supplied)
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router(state)
        // Access log sees the user injected by require_auth
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        .layer(CompressionLayer::new())
        .layer(cors_layer(state.config.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID)))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID),
            XRequestId,
        ))
}
