//! Shipping Config Handlers

use axum::extract::State;
use shared::models::{ShipConfig, ShipConfigCreate, ShipConfigUpdate, ShippingFeeRequest, ShippingQuote};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, ship_config};
use crate::pricing::calculate_shipping_fee;
use crate::pricing::shipping::validate_config;
use crate::utils::extract::{Json, Path};
use crate::utils::validation::validate_amount;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/ship/active - 404 when nothing is active
pub async fn get_active(State(state): State<ServerState>) -> AppResult<Json<ShipConfig>> {
    let mut conn = state.pool.acquire().await.map_err(RepoError::from)?;
    let config = ship_config::find_active(&mut *conn)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NoActiveShipConfig))?;
    Ok(Json(config))
}

/// POST /api/ship/calculate-fee
pub async fn calculate_fee(
    State(state): State<ServerState>,
    Json(req): Json<ShippingFeeRequest>,
) -> AppResult<Json<ShippingQuote>> {
    validate_amount(req.order_value, "order_value")?;
    let mut conn = state.pool.acquire().await.map_err(RepoError::from)?;
    let active = ship_config::find_active(&mut *conn).await?;
    Ok(Json(calculate_shipping_fee(active.as_ref(), req.order_value)))
}

/// GET /api/ship
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ShipConfig>>> {
    Ok(Json(ship_config::find_all(&state.pool).await?))
}

/// GET /api/ship/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<ShipConfig>> {
    let config = ship_config::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ShipConfigNotFound))?;
    Ok(Json(config))
}

/// POST /api/ship - `is_active: true` deactivates every other config
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<ShipConfigCreate>,
) -> AppResult<Json<ShipConfig>> {
    validate_config(
        Some(&payload.name),
        Some(payload.free_ship_threshold),
        Some(payload.flat_fee),
    )?;
    let config = ship_config::create(&state.pool, &payload).await?;
    tracing::info!(ship_config_id = config.id, operator_id = current_user.id, "Shipping config created");
    Ok(Json(config))
}

/// PUT /api/ship/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ShipConfigUpdate>,
) -> AppResult<Json<ShipConfig>> {
    validate_config(payload.name.as_deref(), payload.free_ship_threshold, payload.flat_fee)?;
    let config = ship_config::update(&state.pool, id, &payload).await?;
    Ok(Json(config))
}

/// PUT /api/ship/{id}/activate - make this the only active config
pub async fn activate(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ShipConfig>> {
    let config = ship_config::activate(&state.pool, id).await?;
    tracing::info!(ship_config_id = id, operator_id = current_user.id, "Shipping config switched");
    Ok(Json(config))
}

/// DELETE /api/ship/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    ship_config::delete(&state.pool, id).await?;
    Ok(Json(true))
}
