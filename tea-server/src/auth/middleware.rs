//! Authentication middleware
//!
//! Axum middleware for JWT authentication and authorization

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::auth::permissions::get_default_permissions;
use crate::auth::{CurrentUser, JwtError, cookie};
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

/// Routes reachable without a session.
///
/// A valid token on a public route still attaches the user (checkout and
/// discount application use it for per-user accounting).
pub fn is_public_route(method: &Method, path: &str) -> bool {
    const PUBLIC_GET_PREFIXES: &[&str] = &[
        "/api/categories",
        "/api/products",
        "/api/blogs",
        "/api/address/",
        "/api/landing",
    ];
    const PUBLIC_GET_EXACT: &[&str] = &["/api/orders/track", "/api/ship/active", "/api/company-info"];
    const PUBLIC_POST: &[&str] = &[
        "/api/auth/register",
        "/api/auth/login",
        "/api/auth/logout",
        "/api/orders",
        "/api/orders/preview",
        "/api/discounts/apply",
        "/api/ship/calculate-fee",
    ];

    match *method {
        Method::GET => {
            PUBLIC_GET_EXACT.contains(&path)
                || PUBLIC_GET_PREFIXES.iter().any(|p| path.starts_with(p))
        }
        Method::POST => PUBLIC_POST.contains(&path),
        _ => false,
    }
}

/// Authentication middleware
///
/// Reads the JWT from the `access_token` cookie (or `Authorization: Bearer`)
/// and injects [`CurrentUser`] into request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non `/api/` paths (`/health`, unknown routes fall through to 404)
/// - [`is_public_route`] (token optional)
///
/// # Errors
///
/// | Case | Status |
/// |------|--------|
/// | no token | 401 NotAuthenticated |
/// | expired | 401 TokenExpired |
/// | invalid | 401 TokenInvalid |
/// | account disabled | 403 AccountDisabled |
///
/// A valid token is checked against the stored account, so role changes and
/// deactivation apply without waiting for the token to expire.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS || !req.uri().path().starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let public = is_public_route(req.method(), req.uri().path());
    let token = cookie::token_from_headers(req.headers()).map(str::to_owned);

    let Some(token) = token else {
        if public {
            return Ok(next.run(req).await);
        }
        security_log!("WARN", "auth_missing", uri = req.uri().path().to_string());
        return Err(AppError::unauthorized());
    };

    let decoded = state
        .jwt_service
        .validate_token(&token)
        .and_then(CurrentUser::try_from);

    match decoded {
        Ok(user) => match refresh_account(&state, user).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
                Ok(next.run(req).await)
            }
            Err(_) if public => Ok(next.run(req).await),
            Err(e) => Err(e),
        },
        Err(_) if public => Ok(next.run(req).await),
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().path().to_string()
            );
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Re-read role and active flag so admin changes apply to issued tokens
async fn refresh_account(state: &ServerState, mut user: CurrentUser) -> Result<CurrentUser, AppError> {
    let Some((role, is_active)) = user_repo::account_status(&state.pool, user.id).await? else {
        security_log!("WARN", "auth_unknown_user", user_id = user.id);
        return Err(AppError::invalid_token("Unknown user"));
    };
    if !is_active {
        security_log!("WARN", "auth_account_disabled", user_id = user.id, email = user.email.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }
    if role != user.role {
        user.role = role;
        user.permissions = get_default_permissions(role);
    }
    Ok(user)
}

/// Permission middleware
///
/// ```ignore
/// Router::new()
///     .route("/", post(handler::create))
///     .layer(middleware::from_fn(require_permission("catalog:manage")));
/// ```
///
/// Returns 403 when the current user lacks `permission`.
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::unauthorized)?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id,
                    email = user.email.clone(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Admin-only middleware
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            email = user.email.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public_route(&Method::GET, "/api/products"));
        assert!(is_public_route(&Method::GET, "/api/products/slug/tra-xanh"));
        assert!(is_public_route(&Method::GET, "/api/orders/track"));
        assert!(is_public_route(&Method::POST, "/api/orders"));
        assert!(is_public_route(&Method::POST, "/api/discounts/apply"));
        assert!(is_public_route(&Method::GET, "/api/address/provinces"));
    }

    #[test]
    fn test_protected_routes() {
        assert!(!is_public_route(&Method::POST, "/api/products"));
        assert!(!is_public_route(&Method::GET, "/api/orders"));
        assert!(!is_public_route(&Method::GET, "/api/orders/mine"));
        assert!(!is_public_route(&Method::GET, "/api/admin/landing"));
        assert!(!is_public_route(&Method::GET, "/api/ship"));
        assert!(!is_public_route(&Method::GET, "/api/cart"));
        assert!(!is_public_route(&Method::PUT, "/api/company-info"));
    }
}
