//! Payment Webhook Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::payments::{PaymentWebhookEvent, WebhookOutcome};
use shared::error::AppError;

#[derive(Serialize)]
pub struct WebhookAck {
    pub received: bool,
    /// Number of bookings the event touched
    pub updated: usize,
}

/// POST /api/webhooks/payment - 支付回调 (公开)
///
/// 按 payment_ref 扇出到所有相关预订；未知事件类型直接 ack，
/// 处理商才不会无限重发。
pub async fn payment(
    State(state): State<ServerState>,
    Json(event): Json<PaymentWebhookEvent>,
) -> Result<Json<WebhookAck>, AppError> {
    tracing::info!(
        event_type = %event.event_type,
        payment_ref = %event.payment_ref,
        "Payment webhook received"
    );

    let updated = match event.outcome() {
        WebhookOutcome::Apply {
            payment_status,
            transition,
        } => state
            .bookings()
            .apply_payment_result(&event.payment_ref, payment_status, transition)
            .await?
            .len(),
        WebhookOutcome::Ignore => 0,
    };

    Ok(Json(WebhookAck {
        received: true,
        updated,
    }))
}
