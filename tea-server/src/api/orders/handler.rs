//! Order API Handlers

use axum::extract::State;
use serde::Deserialize;
use shared::PaginatedResponse;
use shared::models::{
    CheckoutRequest, Order, OrderDetail, OrderPreview, OrderPreviewRequest, OrderStatus,
    OrderStatusUpdate,
};

use crate::auth::{CurrentUser, MaybeUser};
use crate::core::ServerState;
use crate::db::repository::{RepoError, order as order_repo};
use crate::orders::{self, CheckoutSource};
use crate::utils::extract::{Json, Path, Query};
use crate::utils::types::PaginationParams;
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/orders - place an order
///
/// Without `items`, a logged-in customer's cart is checked out.
pub async fn checkout(
    State(state): State<ServerState>,
    user: MaybeUser,
    Json(mut req): Json<CheckoutRequest>,
) -> AppResult<Json<OrderDetail>> {
    let source = CheckoutSource::resolve(req.items.take(), user.user_id())?;
    let detail = orders::place_order(&state.pool, req, source, user.user_id()).await?;
    Ok(Json(detail))
}

/// POST /api/orders/preview - price breakdown, nothing is written
pub async fn preview(
    State(state): State<ServerState>,
    user: MaybeUser,
    Json(req): Json<OrderPreviewRequest>,
) -> AppResult<Json<OrderPreview>> {
    let source = CheckoutSource::resolve(req.items, user.user_id())?;
    let preview =
        orders::preview_order(&state.pool, source, req.discount_code.as_deref(), user.user_id()).await?;
    Ok(Json(preview))
}

#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    pub code: String,
    pub phone: String,
}

/// GET /api/orders/track?code=&phone=
pub async fn track(
    State(state): State<ServerState>,
    Query(query): Query<TrackQuery>,
) -> AppResult<Json<OrderDetail>> {
    let order = order_repo::find_by_code_and_phone(&state.pool, &query.code, &query.phone)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    let mut conn = state.pool.acquire().await.map_err(RepoError::from)?;
    let items = order_repo::items(&mut *conn, order.id).await?;
    Ok(Json(OrderDetail { order, items }))
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub q: Option<String>,
}

/// GET /api/orders/mine
pub async fn my_orders(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<OrderListQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<Order>>> {
    let (orders, total) = order_repo::list(
        &state.pool,
        query.status,
        None,
        Some(current_user.id),
        page.limit(),
        page.offset(),
    )
    .await?;
    Ok(Json(PaginatedResponse::new(orders, total, page.page(), page.limit() as u32)))
}

/// POST /api/orders/{id}/cancel - customer cancellation of a pending order
pub async fn cancel(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = orders::cancel_by_customer(&state.pool, id, current_user.id).await?;
    Ok(Json(detail))
}

/// GET /api/orders - back office listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<Order>>> {
    let (orders, total) = order_repo::list(
        &state.pool,
        query.status,
        query.q.as_deref(),
        None,
        page.limit(),
        page.offset(),
    )
    .await?;
    Ok(Json(PaginatedResponse::new(orders, total, page.page(), page.limit() as u32)))
}

/// GET /api/orders/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<OrderDetail>> {
    let mut conn = state.pool.acquire().await.map_err(RepoError::from)?;
    Ok(Json(orders::load_detail(&mut *conn, id).await?))
}

/// PUT /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<OrderDetail>> {
    let detail = orders::change_status(&state.pool, id, payload.status).await?;
    tracing::info!(
        order_id = id,
        status = payload.status.as_str(),
        operator_id = current_user.id,
        "Order status updated by staff"
    );
    Ok(Json(detail))
}
