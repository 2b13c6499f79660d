//! Statistics API Handlers

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::time;
use shared::booking::BookingStatus;
use shared::error::AppError;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Default, Serialize)]
pub struct DayStats {
    pub bookings: usize,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub from: String,
    pub to: String,
    pub total_bookings: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub pending: usize,
    /// 确认/完成预订的营收合计
    pub revenue: Decimal,
    pub by_service_type: BTreeMap<String, usize>,
    pub by_date: BTreeMap<String, DayStats>,
}

/// GET /api/statistics?from=YYYY-MM-DD&to=YYYY-MM-DD - 区间统计
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsSummary>, AppError> {
    let from = time::parse_date(&query.from)?;
    let to = time::parse_date(&query.to)?;
    if from > to {
        return Err(AppError::validation("'from' must not be after 'to'"));
    }

    let bookings = state
        .booking_repo()
        .find_in_date_range(&query.from, &query.to)
        .await?;

    let mut summary = StatsSummary {
        from: query.from,
        to: query.to,
        total_bookings: bookings.len(),
        confirmed: 0,
        completed: 0,
        cancelled: 0,
        pending: 0,
        revenue: Decimal::ZERO,
        by_service_type: BTreeMap::new(),
        by_date: BTreeMap::new(),
    };

    for booking in &bookings {
        match booking.status {
            BookingStatus::Pending => summary.pending += 1,
            BookingStatus::Confirmed => summary.confirmed += 1,
            BookingStatus::Cancelled => summary.cancelled += 1,
            BookingStatus::Completed => summary.completed += 1,
        }

        *summary
            .by_service_type
            .entry(booking.service_type.as_str().to_string())
            .or_default() += 1;

        let day = summary.by_date.entry(booking.date.clone()).or_default();
        day.bookings += 1;

        // 取消的预订不计营收
        if matches!(
            booking.status,
            BookingStatus::Confirmed | BookingStatus::Completed
        ) {
            summary.revenue += booking.price;
            day.revenue += booking.price;
        }
    }

    Ok(Json(summary))
}
