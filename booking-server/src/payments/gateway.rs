//! Payment gateway client
//!
//! 透传式桥接：向支付处理商开一笔 charge，拿回 reference 和
//! checkout 链接。未配置 base_url 时进入 offline 模式，本地生成
//! reference，方便开发和测试。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::db::models::Booking;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct PaymentGateway {
    client: reqwest::Client,
    base_url: Option<String>,
    api_key: String,
    currency: String,
}

/// Result of opening a charge at the processor
#[derive(Debug, Clone, Serialize)]
pub struct ChargeOutcome {
    /// Processor reference, stored on the booking for webhook fan-out
    pub payment_ref: String,
    /// Customer-facing checkout URL (absent in offline mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
}

#[derive(Serialize)]
struct ChargeRequest<'a> {
    amount: Decimal,
    currency: &'a str,
    description: String,
    customer_email: &'a str,
    metadata: ChargeMetadata,
}

#[derive(Serialize)]
struct ChargeMetadata {
    booking_id: String,
}

#[derive(Deserialize)]
struct ChargeResponse {
    id: String,
    #[serde(default)]
    checkout_url: Option<String>,
}

impl PaymentGateway {
    pub fn new(base_url: Option<String>, api_key: String, currency: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            currency,
        }
    }

    /// Open a charge for a booking
    pub async fn create_charge(&self, booking: &Booking) -> AppResult<ChargeOutcome> {
        let booking_id = booking
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::internal("Booking without id"))?;

        let Some(base_url) = &self.base_url else {
            // offline 模式：本地 reference，webhook 由测试或运营工具触发
            let payment_ref = format!("local_{}", uuid::Uuid::new_v4().simple());
            tracing::info!(booking_id, payment_ref, "Charge created (offline mode)");
            return Ok(ChargeOutcome {
                payment_ref,
                checkout_url: None,
            });
        };

        let request = ChargeRequest {
            amount: booking.price,
            currency: &self.currency,
            description: format!(
                "{} booking {} {:02}:00 ({}h)",
                booking.service_type, booking.date, booking.start_hour, booking.duration_hours
            ),
            customer_email: &booking.customer_email,
            metadata: ChargeMetadata { booking_id },
        };

        let response = self
            .client
            .post(format!("{base_url}/charges"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::payment_upstream(format!("Gateway unreachable: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::PAYMENT_REQUIRED {
            return Err(AppError::new(ErrorCode::PaymentDeclined));
        }
        if !status.is_success() {
            return Err(AppError::with_message(
                ErrorCode::PaymentFailed,
                format!("Gateway returned {status}"),
            ));
        }

        let charge: ChargeResponse = response
            .json()
            .await
            .map_err(|e| AppError::payment_upstream(format!("Bad gateway response: {e}")))?;

        Ok(ChargeOutcome {
            payment_ref: charge.id,
            checkout_url: charge.checkout_url,
        })
    }

    /// Request a refund for a settled payment
    pub async fn refund(&self, payment_ref: &str, amount: Decimal) -> AppResult<()> {
        let Some(base_url) = &self.base_url else {
            tracing::info!(payment_ref, %amount, "Refund requested (offline mode)");
            return Ok(());
        };

        let response = self
            .client
            .post(format!("{base_url}/charges/{payment_ref}/refunds"))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "amount": amount }))
            .send()
            .await
            .map_err(|e| AppError::payment_upstream(format!("Gateway unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::PaymentFailed,
                format!("Refund rejected: {}", response.status()),
            ));
        }
        Ok(())
    }
}
