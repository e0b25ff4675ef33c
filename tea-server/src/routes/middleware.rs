//! HTTP access log

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::auth::CurrentUser;

/// One line per completed request, warn level for 4xx/5xx.
///
/// Runs inside `require_auth`, so the session user is known. Matched route
/// templates (`/api/orders/{id}`) are logged rather than raw paths.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let method = req.method().clone();
    let route = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .map(|u| format!("{}({})", u.email, u.id));

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    let failed = status.is_client_error() || status.is_server_error();

    if failed {
        tracing::warn!(
            %request_id, %method, %route, status = status.as_u16(), latency_ms, ?user,
            "Request failed"
        );
    } else {
        tracing::info!(
            %request_id, %method, %route, status = status.as_u16(), latency_ms, ?user,
            "Request completed"
        );
    }

    response
}
