//! Booking model
//!
//! 预订记录：资源 ids + 半开时间窗口 `[start_ms, end_ms)` + 状态机。
//! `date` 冗余存储为 YYYY-MM-DD，可用 booking_date 索引按天扫描。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::booking::{BookingStatus, PaymentStatus, ServiceType};
use surrealdb::RecordId;

use super::serde_helpers;

pub const TABLE: &str = "booking";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub service_type: ServiceType,
    /// Bookable resource ids: "room:<id>" or "chair:<id>"
    pub resource_ids: Vec<String>,
    /// Booking day in the venue timezone, YYYY-MM-DD
    pub date: String,
    pub start_hour: u32,
    pub duration_hours: u32,
    /// Window start, Unix millis
    pub start_ms: i64,
    /// Window end (exclusive), Unix millis
    pub end_ms: i64,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    /// Gateway reference, set once payment is initiated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_ref: Option<String>,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Public booking request payload — everything derived (window millis,
/// price, status) is computed server-side.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingCreate {
    pub service_type: ServiceType,
    /// Room record ids for rooms, chair ids for café
    pub resource_ids: Vec<String>,
    pub date: String,
    pub start_hour: u32,
    pub duration_hours: u32,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Payment already settled upstream (gateway-first flows); a
    /// successful status confirms the booking at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_ref: Option<String>,
}

/// Staff-side partial update (contact details and notes only — the
/// status field moves through its own guarded endpoint).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BookingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Booking {
    /// Whether this booking's window overlaps `[start_ms, end_ms)`
    pub fn overlaps(&self, start_ms: i64, end_ms: i64) -> bool {
        self.start_ms < end_ms && self.end_ms > start_ms
    }
}
