//! Discount API Handlers

use axum::extract::State;
use serde::Deserialize;
use shared::PaginatedResponse;
use shared::models::{
    Discount, DiscountApplyRequest, DiscountApplyResponse, DiscountCreate, DiscountUpdate,
};
use shared::util::now_millis;

use crate::auth::{CurrentUser, MaybeUser};
use crate::core::ServerState;
use crate::db::repository::{RepoError, discount as discount_repo};
use crate::pricing::discount::{discount_from_create, merge_update};
use crate::pricing::{apply_discount, check_eligibility};
use crate::utils::extract::{Json, Path, Query};
use crate::utils::types::PaginationParams;
use crate::utils::validation::validate_amount;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct DiscountListQuery {
    pub q: Option<String>,
}

/// GET /api/discounts
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DiscountListQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<Discount>>> {
    let (discounts, total) =
        discount_repo::list(&state.pool, query.q.as_deref(), page.limit(), page.offset()).await?;
    Ok(Json(PaginatedResponse::new(discounts, total, page.page(), page.limit() as u32)))
}

/// GET /api/discounts/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<Discount>> {
    let discount = discount_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DiscountNotFound))?;
    Ok(Json(discount))
}

/// POST /api/discounts
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<DiscountCreate>,
) -> AppResult<Json<Discount>> {
    let discount = discount_from_create(payload)?;
    let created = discount_repo::create(&state.pool, &discount).await?;
    tracing::info!(
        discount_id = created.id,
        code = %created.code,
        operator_id = current_user.id,
        "Discount created"
    );
    Ok(Json(created))
}

/// PUT /api/discounts/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiscountUpdate>,
) -> AppResult<Json<Discount>> {
    let existing = discount_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DiscountNotFound))?;
    let merged = merge_update(existing, payload)?;
    let updated = discount_repo::update(&state.pool, &merged).await?;
    Ok(Json(updated))
}

/// DELETE /api/discounts/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    discount_repo::delete(&state.pool, id).await?;
    tracing::info!(discount_id = id, operator_id = current_user.id, "Discount deleted");
    Ok(Json(true))
}

/// POST /api/discounts/apply - evaluate a code against an order value
///
/// Per-user limits are checked when the caller is logged in.
pub async fn apply(
    State(state): State<ServerState>,
    user: MaybeUser,
    Json(req): Json<DiscountApplyRequest>,
) -> AppResult<Json<DiscountApplyResponse>> {
    validate_amount(req.order_value, "order_value")?;

    let mut conn = state.pool.acquire().await.map_err(RepoError::from)?;
    let discount = discount_repo::find_by_code(&mut *conn, &req.code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DiscountNotFound))?;
    let used = match user.user_id() {
        Some(user_id) => discount_repo::user_usage_count(&mut *conn, discount.id, user_id).await?,
        None => 0,
    };
    drop(conn);

    check_eligibility(&discount, req.order_value, now_millis(), used)?;
    let outcome = apply_discount(&discount, req.order_value);

    Ok(Json(DiscountApplyResponse {
        discount_id: discount.id,
        code: discount.code,
        discount_type: discount.discount_type,
        value: discount.value,
        order_value: req.order_value,
        discount_amount: outcome.discount_amount,
        final_amount: outcome.final_amount,
    }))
}
