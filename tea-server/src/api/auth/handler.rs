//! Authentication Handlers
//!
//! Register, login and logout set or clear the `access_token` cookie; the
//! token is also returned in the body for non-browser clients.

use axum::{extract::State, http::header::SET_COOKIE};
use shared::models::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, User, UserRole};

use crate::auth::permissions::get_default_permissions;
use crate::auth::{CurrentUser, cookie, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::extract::Json;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_phone, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

type WithCookie<T> = ([(http::HeaderName, String); 1], Json<T>);

fn issue_session(state: &ServerState, user: User) -> AppResult<WithCookie<AuthResponse>> {
    let jwt = state.get_jwt_service();
    let permissions = get_default_permissions(user.role);
    let token = jwt
        .generate_token(user.id, &user.email, user.role, &permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;
    let expires_in = jwt.expiration_seconds();
    let set_cookie = cookie::session_cookie(&token, expires_in, state.config.cookie_secure);

    Ok((
        [(SET_COOKIE, set_cookie)],
        Json(AuthResponse {
            token,
            expires_in,
            user,
        }),
    ))
}

/// POST /api/auth/register - create a customer account and log it in
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<WithCookie<AuthResponse>> {
    let email = req.email.trim().to_lowercase();
    validate_email(&email)?;
    validate_password(&req.password)?;
    validate_required_text(&req.full_name, "full_name", MAX_NAME_LEN)?;
    let phone = req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty());
    if let Some(phone) = phone {
        validate_phone(phone)?;
    }

    let hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
    let user = user::create(&state.pool, &email, &hash, &req.full_name, phone, UserRole::Customer).await?;

    tracing::info!(user_id = user.id, email = %user.email, "Customer registered");
    issue_session(&state, user)
}

/// POST /api/auth/login
///
/// Unknown email and wrong password give the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<WithCookie<AuthResponse>> {
    let email = req.email.trim().to_lowercase();

    let Some(user) = user::find_by_email(&state.pool, &email).await? else {
        security_log!("WARN", "login_failed", email = email, reason = "user_not_found");
        return Err(AppError::invalid_credentials());
    };

    let valid = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        security_log!("WARN", "login_failed", email = email, reason = "invalid_password");
        return Err(AppError::invalid_credentials());
    }

    if !user.is_active {
        security_log!("WARN", "login_failed", email = email, reason = "account_disabled");
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    tracing::info!(user_id = user.id, role = user.role.as_str(), "User logged in");
    issue_session(&state, user)
}

/// POST /api/auth/logout - clear the session cookie
pub async fn logout(State(state): State<ServerState>) -> WithCookie<bool> {
    (
        [(SET_COOKIE, cookie::clear_cookie(state.config.cookie_secure))],
        Json(true),
    )
}

/// GET /api/auth/me
pub async fn me(State(state): State<ServerState>, current_user: CurrentUser) -> AppResult<Json<User>> {
    let user = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(AppError::unauthorized)?;
    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }
    Ok(Json(user))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<bool>> {
    let user = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    let valid = verify_password(&req.current_password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        security_log!("WARN", "password_change_failed", user_id = user.id);
        return Err(AppError::invalid_credentials());
    }

    validate_password(&req.new_password)?;
    let hash = hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
    user::update_password(&state.pool, user.id, &hash).await?;

    security_log!("INFO", "password_changed", user_id = user.id);
    Ok(Json(true))
}
