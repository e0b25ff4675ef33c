//! Per-IP rate limiting for login and registration

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

const WINDOW: Duration = Duration::from_secs(60);
const STALE_AFTER: Duration = Duration::from_secs(300);

/// Fixed window counter for one (route, ip) pair
struct Window {
    started: Instant,
    hits: u32,
}

/// Fixed-window request counter keyed by route and client IP
#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<(&'static str, String), Window>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a hit; `false` once `max_requests` is exceeded inside `window`
    pub async fn check(&self, route: &'static str, ip: &str, max_requests: u32, window: Duration) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let entry = windows.entry((route, ip.to_owned())).or_insert(Window { started: now, hits: 0 });

        if now.duration_since(entry.started) >= window {
            *entry = Window { started: now, hits: 0 };
        }
        entry.hits += 1;
        entry.hits <= max_requests
    }

    /// Forget clients idle for five minutes
    pub async fn cleanup(&self) {
        let now = Instant::now();
        self.windows
            .lock()
            .await
            .retain(|_, w| now.duration_since(w.started) < STALE_AFTER);
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Client IP: the peer address, or the first `X-Forwarded-For` entry when
/// `trust_forwarded` is set (the header is client-controlled without a proxy)
fn extract_ip(request: &Request, trust_forwarded: bool) -> String {
    if trust_forwarded
        && let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn limit(
    state: &ServerState,
    route: &'static str,
    max_requests: u32,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = extract_ip(&request, state.config.trust_proxy_headers);
    if !state.rate_limiter.check(route, &ip, max_requests, WINDOW).await {
        security_log!("WARN", "rate_limited", route = route, ip = ip);
        return Err(AppError::new(ErrorCode::TooManyAttempts));
    }
    Ok(next.run(request).await)
}

/// Login: `LOGIN_RATE_LIMIT` requests per minute per IP
pub async fn login_rate_limit(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let max = state.config.login_rate_limit;
    limit(&state, "login", max, request, next).await
}

/// Registration: `REGISTER_RATE_LIMIT` requests per minute per IP
pub async fn register_rate_limit(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let max = state.config.register_rate_limit;
    limit(&state, "register", max, request, next).await
}
