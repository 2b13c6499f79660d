//! Room model — karaoke rooms and retro-gaming booths
//!
//! 房间是整体预订的资源：一次预订独占一个或多个房间。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::booking::ServiceType;
use surrealdb::RecordId;

use super::serde_helpers;

pub const TABLE: &str = "room";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub service_type: ServiceType,
    /// Maximum number of guests
    pub capacity: u32,
    /// Price per hour
    pub hourly_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomCreate {
    pub name: String,
    pub service_type: ServiceType,
    pub capacity: u32,
    pub hourly_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoomUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Room {
    /// Resource id used inside bookings, e.g. "room:sala_1"
    pub fn resource_id(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_string())
    }
}
