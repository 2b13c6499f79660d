//! Customer Records API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::User;
use shared::error::AppError;

/// GET /api/users - 顾客记录，按最近预订排序
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.user_repo().find_all().await?;
    Ok(Json(users))
}
