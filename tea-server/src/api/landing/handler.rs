//! Landing Section Handlers

use axum::extract::State;
use shared::models::{LandingSection, LandingSectionUpsert};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::landing;
use crate::utils::extract::{Json, Path};
use crate::utils::validation::{MAX_CONTENT_LEN, MAX_TITLE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

const MAX_KEY_LEN: usize = 50;

fn validate_key(key: &str) -> Result<(), AppError> {
    let ok = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if !ok {
        return Err(AppError::validation("key must match [a-z0-9_-]{1,50}").with_detail("field", "key"));
    }
    Ok(())
}

fn validate_upsert(payload: &LandingSectionUpsert) -> Result<(), AppError> {
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    if !payload.content.is_object() {
        return Err(AppError::validation("content must be a JSON object").with_detail("field", "content"));
    }
    if payload.content.to_string().len() > MAX_CONTENT_LEN {
        return Err(AppError::validation(format!("content is too long (max {MAX_CONTENT_LEN} bytes)"))
            .with_detail("field", "content"));
    }
    Ok(())
}

/// GET /api/landing
pub async fn list_visible(State(state): State<ServerState>) -> AppResult<Json<Vec<LandingSection>>> {
    Ok(Json(landing::find_all(&state.pool, true).await?))
}

/// GET /api/landing/{key} - hidden sections look missing
pub async fn get_visible(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> AppResult<Json<LandingSection>> {
    let section = landing::find_by_key(&state.pool, &key)
        .await?
        .filter(|s| s.is_visible)
        .ok_or_else(|| AppError::new(ErrorCode::LandingSectionNotFound))?;
    Ok(Json(section))
}

/// GET /api/admin/landing
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<LandingSection>>> {
    Ok(Json(landing::find_all(&state.pool, false).await?))
}

/// GET /api/admin/landing/{key}
pub async fn get_any(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> AppResult<Json<LandingSection>> {
    let section = landing::find_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LandingSectionNotFound))?;
    Ok(Json(section))
}

/// PUT /api/admin/landing/{key}
pub async fn upsert(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(key): Path<String>,
    Json(payload): Json<LandingSectionUpsert>,
) -> AppResult<Json<LandingSection>> {
    validate_key(&key)?;
    validate_upsert(&payload)?;

    let section = landing::upsert(&state.pool, &key, &payload).await?;
    tracing::info!(key = %key, operator_id = current_user.id, "Landing section saved");
    Ok(Json(section))
}

/// DELETE /api/admin/landing/{key}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(key): Path<String>,
) -> AppResult<Json<bool>> {
    landing::delete(&state.pool, &key).await?;
    tracing::info!(key = %key, operator_id = current_user.id, "Landing section deleted");
    Ok(Json(true))
}
