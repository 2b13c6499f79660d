//! Café Layout API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::{CafeLayout, LayoutUpdate};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use shared::error::AppError;

/// GET /api/layout - 咖啡区布局 (公开)
pub async fn get(State(state): State<ServerState>) -> Result<Json<CafeLayout>, AppError> {
    let layout = state.layout_repo().get_or_default().await?;
    Ok(Json(layout))
}

/// PUT /api/layout - 替换椅子布局/费率
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<LayoutUpdate>,
) -> Result<Json<CafeLayout>, AppError> {
    if let Some(chairs) = &payload.chairs {
        for chair in chairs {
            validate_required_text(&chair.id, "chair id", MAX_SHORT_TEXT_LEN)?;
            validate_required_text(&chair.label, "chair label", MAX_NAME_LEN)?;
        }
    }
    if let Some(rate) = payload.hourly_rate
        && rate.is_sign_negative()
    {
        return Err(AppError::validation("hourly_rate must not be negative"));
    }

    let layout = state.layout_repo().update(payload).await?;
    Ok(Json(layout))
}
