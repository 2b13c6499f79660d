//! Shared types for the venue booking backend
//!
//! Common types used by the booking server and its clients: the unified
//! error model, the API response envelope, booking domain enums (service
//! type, booking status, payment status) and small utilities.

pub mod booking;
pub mod client;
pub mod error;
pub mod types;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use booking::{BookingStatus, PaymentStatus, ServiceType};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
