//! Customer record — keyed by email, accumulated across bookings
//!
//! 不是账号系统：顾客无需注册，按 email 聚合历史预订统计。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub const TABLE: &str = "user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub booking_count: u64,
    pub last_booking_at: i64,
}

/// Upsert payload applied on every accepted booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpsert {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
