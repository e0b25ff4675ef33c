//! Category API Handlers

use axum::extract::State;
use serde::Deserialize;
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::util::slugify;

use crate::auth::{CurrentUser, MaybeUser};
use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text, validate_slug,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const MANAGE: &str = "catalog:manage";

#[derive(Debug, Deserialize)]
pub struct CategoryListQuery {
    /// Include hidden categories (catalog managers only)
    #[serde(default)]
    pub include_inactive: bool,
}

fn can_manage(user: &MaybeUser) -> bool {
    user.0.as_ref().is_some_and(|u| u.has_permission(MANAGE))
}

/// GET /api/categories
pub async fn list(
    State(state): State<ServerState>,
    user: MaybeUser,
    Query(query): Query<CategoryListQuery>,
) -> AppResult<Json<Vec<Category>>> {
    let include_inactive = query.include_inactive && can_manage(&user);
    let categories = category::find_all(&state.pool, include_inactive).await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: MaybeUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = category::find_by_id(&state.pool, id)
        .await?
        .filter(|c| c.is_active || can_manage(&user))
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    Ok(Json(category))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    let slug = match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(&payload.name),
    };
    validate_slug(&slug)?;

    let category = category::create(&state.pool, &payload, &slug).await?;
    tracing::info!(category_id = category.id, operator_id = current_user.id, "Category created");
    Ok(Json(category))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(slug) = payload.slug.take() {
        let slug = slug.trim().to_string();
        validate_slug(&slug)?;
        payload.slug = Some(slug);
    }

    let category = category::update(&state.pool, id, &payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id}
///
/// Refused with `CategoryHasProducts` while active products use it.
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    category::delete(&state.pool, id).await?;
    tracing::info!(category_id = id, operator_id = current_user.id, "Category deleted");
    Ok(Json(true))
}
