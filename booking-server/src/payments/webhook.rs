//! Payment webhook event mapping
//!
//! 处理商回调 `{type, payment_ref, status}` → 预订状态机动作。
//! status 字段为准，缺失时退回事件名后缀。未知结果直接确认收到，
//! 不触碰任何预订。

use serde::Deserialize;
use shared::booking::{BookingStatus, PaymentStatus};

/// Incoming webhook payload from the payment processor
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentWebhookEvent {
    /// Event name, e.g. "payment.updated"
    #[serde(rename = "type")]
    pub event_type: String,
    /// Charge reference, matches `Booking::payment_ref`
    #[serde(alias = "paymentId", alias = "payment_id")]
    pub payment_ref: String,
    /// Payment outcome carried by the event
    #[serde(default)]
    pub status: Option<String>,
}

/// What a webhook event means for affected bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Record the payment status and, when legal, drive the transition
    Apply {
        payment_status: PaymentStatus,
        transition: Option<BookingStatus>,
    },
    /// Unrecognized event, acknowledge without touching bookings
    Ignore,
}

impl PaymentWebhookEvent {
    /// Map the processor event to a booking action.
    ///
    /// The `status` field decides ("payment.updated" + "succeeded"
    /// confirms). Processors that omit it encode the outcome in the
    /// event name instead, so the suffix after the last '.' is the
    /// fallback — "payment.succeeded" and "charge.succeeded" both
    /// confirm.
    pub fn outcome(&self) -> WebhookOutcome {
        let key = match self.status.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => self
                .event_type
                .rsplit('.')
                .next()
                .unwrap_or(self.event_type.as_str()),
        };

        match key {
            "succeeded" | "paid" | "completed" => WebhookOutcome::Apply {
                payment_status: PaymentStatus::Succeeded,
                transition: Some(BookingStatus::Confirmed),
            },
            "failed" | "canceled" | "cancelled" | "expired" => WebhookOutcome::Apply {
                payment_status: PaymentStatus::Failed,
                transition: Some(BookingStatus::Cancelled),
            },
            "refunded" => WebhookOutcome::Apply {
                payment_status: PaymentStatus::Refunded,
                transition: Some(BookingStatus::Cancelled),
            },
            _ => WebhookOutcome::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: &str, status: Option<&str>) -> PaymentWebhookEvent {
        PaymentWebhookEvent {
            event_type: event_type.to_string(),
            payment_ref: "ch_123".to_string(),
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_status_field_drives_the_outcome() {
        // 通用事件名 + status 字段 ("payment.updated" 风格)
        assert_eq!(
            event("payment.updated", Some("succeeded")).outcome(),
            WebhookOutcome::Apply {
                payment_status: PaymentStatus::Succeeded,
                transition: Some(BookingStatus::Confirmed),
            }
        );
        assert_eq!(
            event("payment.created", Some("failed")).outcome(),
            WebhookOutcome::Apply {
                payment_status: PaymentStatus::Failed,
                transition: Some(BookingStatus::Cancelled),
            }
        );
        assert_eq!(
            event("payment.updated", Some("refunded")).outcome(),
            WebhookOutcome::Apply {
                payment_status: PaymentStatus::Refunded,
                transition: Some(BookingStatus::Cancelled),
            }
        );
    }

    #[test]
    fn test_event_name_suffix_is_the_fallback() {
        for name in ["payment.succeeded", "charge.paid", "checkout.completed"] {
            assert_eq!(
                event(name, None).outcome(),
                WebhookOutcome::Apply {
                    payment_status: PaymentStatus::Succeeded,
                    transition: Some(BookingStatus::Confirmed),
                }
            );
        }
        for name in ["payment.failed", "payment.canceled", "checkout.expired"] {
            assert_eq!(
                event(name, None).outcome(),
                WebhookOutcome::Apply {
                    payment_status: PaymentStatus::Failed,
                    transition: Some(BookingStatus::Cancelled),
                }
            );
        }
        assert_eq!(
            event("charge.refunded", None).outcome(),
            WebhookOutcome::Apply {
                payment_status: PaymentStatus::Refunded,
                transition: Some(BookingStatus::Cancelled),
            }
        );
    }

    #[test]
    fn test_unknown_outcomes_are_ignored() {
        assert_eq!(
            event("payment.updated", Some("processing")).outcome(),
            WebhookOutcome::Ignore
        );
        assert_eq!(event("payment.updated", None).outcome(), WebhookOutcome::Ignore);
        assert_eq!(event("whatever", None).outcome(), WebhookOutcome::Ignore);
    }

    #[test]
    fn test_processor_field_names_deserialize() {
        let event: PaymentWebhookEvent = serde_json::from_value(serde_json::json!({
            "type": "payment.updated",
            "paymentId": "pay_42",
            "status": "succeeded",
        }))
        .unwrap();
        assert_eq!(event.payment_ref, "pay_42");
        assert_eq!(
            event.outcome(),
            WebhookOutcome::Apply {
                payment_status: PaymentStatus::Succeeded,
                transition: Some(BookingStatus::Confirmed),
            }
        );
    }
}
