//! Company Info Handlers

use axum::extract::State;
use shared::models::{CompanyInfo, CompanyInfoUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::company_info;
use crate::utils::extract::Json;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_email,
    validate_optional_text, validate_phone, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/company-info
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<CompanyInfo>> {
    let info = company_info::get(&state.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Company info"))?;
    Ok(Json(info))
}

/// PUT /api/company-info - partial update of the singleton
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<CompanyInfoUpdate>,
) -> AppResult<Json<CompanyInfo>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = payload.email.as_deref().filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }
    if let Some(phone) = payload.phone.as_deref().filter(|p| !p.is_empty()) {
        validate_phone(phone)?;
    }
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.tax_code, "tax_code", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.business_hours, "business_hours", MAX_NAME_LEN)?;
    for (field, url) in [
        ("logo_url", &payload.logo_url),
        ("facebook_url", &payload.facebook_url),
        ("zalo_url", &payload.zalo_url),
    ] {
        validate_optional_text(url, field, MAX_URL_LEN)?;
    }

    let info = company_info::update(&state.pool, &payload).await?;
    tracing::info!(operator_id = current_user.id, "Company info updated");
    Ok(Json(info))
}
