//! Venue settings — single record, settings:venue
//!
//! 营业时间和预订约束都从这里读取，没有全局可变单例。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub const TABLE: &str = "settings";
pub const SINGLETON_ID: &str = "venue";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub venue_name: String,
    /// IANA timezone name, e.g. "Europe/Madrid"
    pub timezone: String,
    /// First bookable hour of the day (inclusive)
    pub opening_hour: u32,
    /// Last bookable hour boundary (exclusive, 24 = midnight)
    pub closing_hour: u32,
    pub min_duration_hours: u32,
    pub max_duration_hours: u32,
    /// Sender address for confirmation mail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: None,
            venue_name: "Pavilion".to_string(),
            timezone: "Europe/Madrid".to_string(),
            opening_hour: 10,
            closing_hour: 24,
            min_duration_hours: 1,
            max_duration_hours: 8,
            contact_email: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_duration_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}
