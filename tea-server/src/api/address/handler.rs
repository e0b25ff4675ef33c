//! Address Lookup Handlers

use axum::extract::State;
use shared::models::{District, Province, Ward};

use crate::core::ServerState;
use crate::db::repository::address;
use crate::utils::extract::{Json, Path};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/address/provinces
pub async fn provinces(State(state): State<ServerState>) -> AppResult<Json<Vec<Province>>> {
    Ok(Json(address::provinces(&state.pool).await?))
}

/// GET /api/address/provinces/{code}/districts
pub async fn districts(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Vec<District>>> {
    if !address::province_exists(&state.pool, &code).await? {
        return Err(AppError::new(ErrorCode::ProvinceNotFound));
    }
    Ok(Json(address::districts(&state.pool, &code).await?))
}

/// GET /api/address/districts/{code}/wards
pub async fn wards(State(state): State<ServerState>, Path(code): Path<String>) -> AppResult<Json<Vec<Ward>>> {
    if !address::district_exists(&state.pool, &code).await? {
        return Err(AppError::new(ErrorCode::DistrictNotFound));
    }
    Ok(Json(address::wards(&state.pool, &code).await?))
}
