//! Client-facing DTOs
//!
//! Request/response payloads shared between the booking server and the
//! staff console.

use serde::{Deserialize, Serialize};

/// Staff login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub pin: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub staff: StaffInfo,
}

/// Staff member information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}
