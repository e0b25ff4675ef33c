//! User Management Handlers

use axum::extract::State;
use serde::Deserialize;
use shared::PaginatedResponse;
use shared::models::{User, UserAdminUpdate, UserRole};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::types::PaginationParams;
use crate::utils::validation::{MAX_NAME_LEN, validate_phone, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub q: Option<String>,
    pub role: Option<UserRole>,
}

/// GET /api/admin/users
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<UserListQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<User>>> {
    let (users, total) = user::list(
        &state.pool,
        query.q.as_deref(),
        query.role,
        page.limit(),
        page.offset(),
    )
    .await?;
    Ok(Json(PaginatedResponse::new(users, total, page.page(), page.limit() as u32)))
}

/// GET /api/admin/users/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<User>> {
    let user = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;
    Ok(Json(user))
}

/// PUT /api/admin/users/{id} - role, active flag, profile
///
/// Admins cannot demote or disable themselves.
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UserAdminUpdate>,
) -> AppResult<Json<User>> {
    let touches_access = payload.role.is_some_and(|r| r != UserRole::Admin)
        || payload.is_active == Some(false);
    if id == current_user.id && touches_access {
        return Err(AppError::new(ErrorCode::CannotModifySelf));
    }
    if let Some(name) = &payload.full_name {
        validate_required_text(name, "full_name", MAX_NAME_LEN)?;
    }
    if let Some(phone) = &payload.phone {
        validate_phone(phone.trim())?;
    }

    let updated = user::admin_update(&state.pool, id, &payload).await?;

    security_log!(
        "INFO",
        "user_updated",
        operator_id = current_user.id,
        target_id = id,
        role = updated.role.as_str(),
        is_active = updated.is_active
    );
    Ok(Json(updated))
}
