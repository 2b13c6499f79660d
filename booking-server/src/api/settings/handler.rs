//! Settings API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::{Settings, SettingsUpdate};
use crate::utils::validation::{MAX_NAME_LEN, validate_email, validate_required_text};
use shared::error::AppError;

/// GET /api/settings - 场馆设置 (员工)
pub async fn get(State(state): State<ServerState>) -> Result<Json<Settings>, AppError> {
    let settings = state.settings_repo().get_or_default().await?;
    Ok(Json(settings))
}

/// PUT /api/settings - 更新场馆设置
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> Result<Json<Settings>, AppError> {
    if let Some(name) = &payload.venue_name {
        validate_required_text(name, "venue_name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.contact_email {
        validate_email(email, "contact_email")?;
    }

    let settings = state.settings_repo().update(payload).await?;
    Ok(Json(settings))
}
