//! Availability API Handlers

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::time;
use shared::booking::ServiceType;
use shared::error::{AppError, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub service_type: ServiceType,
    /// With a start hour the query becomes a window spot check
    pub start_hour: Option<u32>,
    pub duration_hours: Option<u32>,
}

/// Spot-check response: which resources are taken in the window
#[derive(Debug, Serialize)]
pub struct WindowAvailability {
    pub date: String,
    pub start_hour: u32,
    pub duration_hours: u32,
    pub unavailable: Vec<String>,
}

/// GET /api/availability?date=YYYY-MM-DD&service_type=karaoke - 按日可用性 (公开)
///
/// 带 start_hour (+ duration_hours) 时返回该窗口内被占用的资源 id 集合，
/// 否则返回整天的忙闲网格。
pub async fn day(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Response, AppError> {
    // 校验日期格式，无效日期直接 400
    let date = time::parse_date(&query.date)?;

    if let Some(start_hour) = query.start_hour {
        let duration_hours = query.duration_hours.unwrap_or(1);
        if start_hour >= 24 {
            return Err(AppError::validation(format!(
                "Invalid start hour: {start_hour}"
            )));
        }
        if duration_hours == 0 {
            return Err(AppError::validation("duration_hours must be at least 1"));
        }

        let settings = state.settings_repo().get_or_default().await?;
        let tz: chrono_tz::Tz = settings
            .timezone
            .parse()
            .map_err(|_| AppError::with_message(ErrorCode::ConfigError, "Invalid venue timezone"))?;
        let (start_ms, end_ms) = time::booking_window_millis(date, start_hour, duration_hours, tz)?;

        let unavailable = state
            .availability()
            .unavailable_resources(&query.date, query.service_type, start_ms, end_ms)
            .await?;
        return Ok(Json(WindowAvailability {
            date: query.date,
            start_hour,
            duration_hours,
            unavailable,
        })
        .into_response());
    }

    let grid = state
        .availability()
        .day_availability(&query.date, query.service_type)
        .await?;
    Ok(Json(grid).into_response())
}
