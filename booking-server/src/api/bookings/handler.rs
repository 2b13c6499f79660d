//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Booking, BookingCreate, BookingUpdate};
use crate::db::repository::booking::BookingFilter;
use crate::payments::ChargeOutcome;
use shared::booking::{BookingStatus, PaymentStatus, ServiceType};
use shared::error::{AppError, ErrorCode};

/// POST /api/bookings - 顾客创建预订 (公开)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.bookings().create(payload).await?;
    Ok(Json(booking))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
    pub status: Option<BookingStatus>,
    pub service_type: Option<ServiceType>,
    pub customer_email: Option<String>,
}

/// GET /api/bookings - 预订列表 (员工)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let filter = BookingFilter {
        date: query.date,
        status: query.status,
        service_type: query.service_type,
        customer_email: query.customer_email,
    };
    let bookings = state.bookings().list(&filter).await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/:id - 预订详情 (员工)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.bookings().get(&id).await?;
    Ok(Json(booking))
}

/// PUT /api/bookings/:id - 修改联系人信息和备注 (员工)
pub async fn update_details(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BookingUpdate>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.bookings().update_details(&id, payload).await?;
    Ok(Json(booking))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

/// PUT /api/bookings/:id/status - 状态机转换 (员工)
///
/// 不合法的转换返回 409。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.bookings().update_status(&id, payload.status).await?;
    Ok(Json(booking))
}

/// POST /api/bookings/:id/pay - 发起支付 (公开)
///
/// 向支付网关开 charge，把 reference 记到预订上，返回 checkout 链接。
pub async fn pay(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ChargeOutcome>, AppError> {
    let booking = state.bookings().get(&id).await?;

    if booking.status != BookingStatus::Pending {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Booking is {}, payment not applicable", booking.status),
        ));
    }
    if booking.payment_status == PaymentStatus::Succeeded {
        return Err(AppError::with_message(
            ErrorCode::PaymentFailed,
            "Booking is already paid",
        ));
    }
    if booking.price.is_zero() {
        return Err(AppError::with_message(
            ErrorCode::PaymentFailed,
            "Nothing to pay for this booking",
        ));
    }

    let outcome = state.gateway().create_charge(&booking).await?;
    state
        .bookings()
        .attach_payment_ref(&id, &outcome.payment_ref)
        .await?;

    Ok(Json(outcome))
}
