//! Café floor layout — individually bookable chairs
//!
//! 单例记录：layout:cafe。椅子按 id 逐个预订，不是整体预订。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub const TABLE: &str = "layout";
/// The one café layout record id
pub const SINGLETON_ID: &str = "cafe";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chair {
    /// Stable chair identifier, unique within the layout, e.g. "c01"
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CafeLayout {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub chairs: Vec<Chair>,
    /// Price per chair per hour
    pub hourly_rate: Decimal,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chairs: Option<Vec<Chair>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
}

impl CafeLayout {
    /// Resource id for a chair inside bookings, e.g. "chair:c01"
    pub fn chair_resource_id(chair_id: &str) -> String {
        format!("chair:{chair_id}")
    }

    pub fn has_chair(&self, chair_id: &str) -> bool {
        self.chairs.iter().any(|c| c.id == chair_id)
    }
}

impl Default for CafeLayout {
    fn default() -> Self {
        Self {
            id: None,
            chairs: Vec::new(),
            hourly_rate: Decimal::ZERO,
        }
    }
}
