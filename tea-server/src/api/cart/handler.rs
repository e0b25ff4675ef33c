//! Cart Handlers
//!
//! Every mutation returns the refreshed cart.

use axum::extract::State;
use rust_decimal::Decimal;
use shared::models::{Cart, CartItemAdd, CartItemUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, cart, product};
use crate::utils::extract::{Json, Path};
use crate::utils::money::{to_decimal, to_f64};
use crate::utils::{AppError, AppResult, ErrorCode};

const MAX_QUANTITY: i64 = 999;

fn check_quantity(quantity: i64) -> AppResult<()> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(AppError::with_message(
            ErrorCode::CartQuantityInvalid,
            format!("Quantity must be between 1 and {MAX_QUANTITY}"),
        ));
    }
    Ok(())
}

/// The SKU must be sellable with at least `quantity` in stock
async fn check_sku(state: &ServerState, sku_id: i64, quantity: i64) -> AppResult<()> {
    let mut conn = state.pool.acquire().await.map_err(RepoError::from)?;
    let sku = product::find_sellable(&mut *conn, sku_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SkuNotFound))?;
    if !sku.is_active {
        return Err(AppError::new(ErrorCode::SkuInactive));
    }
    if sku.stock < quantity {
        return Err(AppError::new(ErrorCode::InsufficientStock)
            .with_detail("sku_id", sku_id)
            .with_detail("available", sku.stock));
    }
    Ok(())
}

async fn load_cart(state: &ServerState, user_id: i64) -> AppResult<Cart> {
    let items = cart::lines(&state.pool, user_id).await?;
    let item_count = items.iter().map(|l| l.quantity).sum();
    let subtotal: Decimal = items.iter().map(|l| to_decimal(l.line_total)).sum();
    Ok(Cart {
        items,
        item_count,
        subtotal: to_f64(subtotal),
    })
}

/// GET /api/cart
pub async fn get_cart(State(state): State<ServerState>, current_user: CurrentUser) -> AppResult<Json<Cart>> {
    Ok(Json(load_cart(&state, current_user.id).await?))
}

/// POST /api/cart/items - add, merging into an existing line
pub async fn add_item(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<CartItemAdd>,
) -> AppResult<Json<Cart>> {
    check_quantity(payload.quantity)?;
    let existing = cart::quantity(&state.pool, current_user.id, payload.sku_id)
        .await?
        .unwrap_or(0);
    let merged = existing + payload.quantity;
    check_quantity(merged)?;
    check_sku(&state, payload.sku_id, merged).await?;

    cart::add(&state.pool, current_user.id, payload.sku_id, payload.quantity).await?;
    Ok(Json(load_cart(&state, current_user.id).await?))
}

/// PUT /api/cart/items/{sku_id} - set the quantity
pub async fn update_item(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(sku_id): Path<i64>,
    Json(payload): Json<CartItemUpdate>,
) -> AppResult<Json<Cart>> {
    check_quantity(payload.quantity)?;
    check_sku(&state, sku_id, payload.quantity).await?;
    cart::set_quantity(&state.pool, current_user.id, sku_id, payload.quantity).await?;
    Ok(Json(load_cart(&state, current_user.id).await?))
}

/// DELETE /api/cart/items/{sku_id}
pub async fn remove_item(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(sku_id): Path<i64>,
) -> AppResult<Json<Cart>> {
    cart::remove(&state.pool, current_user.id, sku_id).await?;
    Ok(Json(load_cart(&state, current_user.id).await?))
}

/// DELETE /api/cart
pub async fn clear(State(state): State<ServerState>, current_user: CurrentUser) -> AppResult<Json<Cart>> {
    let mut conn = state.pool.acquire().await.map_err(RepoError::from)?;
    cart::clear(&mut *conn, current_user.id).await?;
    drop(conn);
    Ok(Json(load_cart(&state, current_user.id).await?))
}
