//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};

use crate::core::ServerState;
use shared::client::{LoginRequest, LoginResponse, StaffInfo};
use shared::error::AppError;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login - 员工登录
///
/// 统一错误信息，防止账号枚举；固定延迟，防止时序攻击。
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let staff = state.staff_repo().find_by_name(&req.name).await?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let staff = match staff {
        Some(s) => {
            if !s.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            let pin_valid = s
                .verify_pin(&req.pin)
                .map_err(|e| AppError::internal(format!("PIN verification failed: {}", e)))?;

            if !pin_valid {
                tracing::warn!(name = %req.name, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            s
        }
        None => {
            tracing::warn!(name = %req.name, "Login failed - unknown staff");
            return Err(AppError::invalid_credentials());
        }
    };

    let staff_id = staff.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = state
        .jwt_service()
        .generate_token(&staff_id, &staff.name, &staff.permissions)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(name = %staff.name, "Staff logged in");

    Ok(Json(LoginResponse {
        token,
        staff: StaffInfo {
            id: staff_id,
            name: staff.name,
            permissions: staff.permissions,
        },
    }))
}
