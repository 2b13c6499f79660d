//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Room, RoomCreate, RoomUpdate};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use shared::error::AppError;

/// GET /api/rooms - 房间列表 (公开)
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = state.room_repo().find_all().await?;
    Ok(Json(rooms))
}

/// POST /api/rooms - 创建房间
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> Result<Json<Room>, AppError> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if payload.hourly_rate.is_sign_negative() {
        return Err(AppError::validation("hourly_rate must not be negative"));
    }
    if !payload.service_type.is_room() {
        return Err(AppError::validation(
            "Rooms must be karaoke or gaming; café seating lives in the layout",
        ));
    }

    let room = state.room_repo().create(payload).await?;
    Ok(Json(room))
}

/// PUT /api/rooms/:id - 更新房间
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomUpdate>,
) -> Result<Json<Room>, AppError> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(rate) = payload.hourly_rate
        && rate.is_sign_negative()
    {
        return Err(AppError::validation("hourly_rate must not be negative"));
    }

    let room = state.room_repo().update(&id, payload).await?;
    Ok(Json(room))
}

/// DELETE /api/rooms/:id - 删除房间
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<bool>, AppError> {
    let result = state.room_repo().delete(&id).await?;
    Ok(Json(result))
}
