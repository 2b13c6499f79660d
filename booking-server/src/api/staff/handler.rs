//! Staff API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Staff, StaffCreate, StaffUpdate};
use crate::utils::validation::{MAX_NAME_LEN, MAX_PIN_LEN, validate_required_text};
use shared::error::{AppError, ErrorCode};

/// GET /api/staff - 员工列表
///
/// `hashed_pin` 标记了 skip_serializing，不会出现在响应里。
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Staff>>, AppError> {
    let staff = state.staff_repo().find_all().await?;
    Ok(Json(staff))
}

/// POST /api/staff - 创建员工
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCreate>,
) -> Result<Json<Staff>, AppError> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.pin, "pin", MAX_PIN_LEN)?;

    let staff = state.staff_repo().create(payload).await?;
    Ok(Json(staff))
}

/// PUT /api/staff/:id - 更新员工
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StaffUpdate>,
) -> Result<Json<Staff>, AppError> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(pin) = &payload.pin {
        validate_required_text(pin, "pin", MAX_PIN_LEN)?;
    }

    let staff = state.staff_repo().update(&id, payload).await?;
    Ok(Json(staff))
}

/// DELETE /api/staff/:id - 删除员工
///
/// 不能删除自己的账号。
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<bool>, AppError> {
    if user.id == id {
        return Err(AppError::new(ErrorCode::StaffCannotDeleteSelf));
    }

    let result = state.staff_repo().delete(&id).await?;
    Ok(Json(result))
}
