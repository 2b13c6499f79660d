//! Unified error codes for the booking backend
//!
//! This module defines all error codes used across the server and its
//! clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Booking errors
//! - 5xxx: Payment errors
//! - 6xxx: Resource errors (rooms, layout, chairs)
//! - 7xxx: Settings errors
//! - 8xxx: Staff / user errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (staff name / PIN)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Requested resources conflict with an existing booking
    BookingConflict = 4002,
    /// Status transition not allowed by the state machine
    InvalidStatusTransition = 4003,
    /// Booking duration outside configured bounds
    DurationOutOfRange = 4004,
    /// Requested window falls outside opening hours
    OutsideOpeningHours = 4005,
    /// No resources selected
    EmptyResourceSelection = 4006,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment was declined by the processor
    PaymentDeclined = 5002,
    /// Refund amount exceeds payment
    RefundExceedsAmount = 5003,
    /// Payment gateway unreachable
    PaymentGatewayUnavailable = 5004,

    // ==================== 6xxx: Resources ====================
    /// Room not found
    RoomNotFound = 6001,
    /// Room name already exists
    RoomNameExists = 6002,
    /// Room is disabled
    RoomInactive = 6003,
    /// Café layout not found
    LayoutNotFound = 6101,
    /// Requested chair is not part of the café layout
    ChairNotInLayout = 6102,
    /// Chair label already exists in the layout
    ChairLabelExists = 6103,

    // ==================== 7xxx: Settings ====================
    /// Venue settings not found
    SettingsNotFound = 7001,

    // ==================== 8xxx: Staff / Users ====================
    /// Staff member not found
    StaffNotFound = 8001,
    /// Staff name already exists
    StaffNameExists = 8002,
    /// Cannot modify/delete system staff account
    StaffIsSystem = 8003,
    /// Cannot delete self
    StaffCannotDeleteSelf = 8004,
    /// Customer user not found
    UserNotFound = 8101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Mail dispatch failed (logged, never surfaced to booking callers)
    MailDispatchFailed = 9101,
    /// Notification queue is full
    NotifyQueueFull = 9102,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid staff name or PIN",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::BookingConflict => {
                "Requested resources conflict with an existing booking"
            }
            ErrorCode::InvalidStatusTransition => "Status transition is not allowed",
            ErrorCode::DurationOutOfRange => "Booking duration is outside allowed bounds",
            ErrorCode::OutsideOpeningHours => "Requested time is outside opening hours",
            ErrorCode::EmptyResourceSelection => "No resources selected",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentDeclined => "Payment was declined",
            ErrorCode::RefundExceedsAmount => "Refund amount exceeds the payment",
            ErrorCode::PaymentGatewayUnavailable => "Payment gateway is unavailable",

            // Resources
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::RoomNameExists => "Room name already exists",
            ErrorCode::RoomInactive => "Room is disabled",
            ErrorCode::LayoutNotFound => "Café layout not found",
            ErrorCode::ChairNotInLayout => "Chair is not part of the café layout",
            ErrorCode::ChairLabelExists => "Chair label already exists in the layout",

            // Settings
            ErrorCode::SettingsNotFound => "Venue settings not found",

            // Staff / Users
            ErrorCode::StaffNotFound => "Staff member not found",
            ErrorCode::StaffNameExists => "Staff name already exists",
            ErrorCode::StaffIsSystem => "Cannot modify a system staff account",
            ErrorCode::StaffCannotDeleteSelf => "Cannot delete your own account",
            ErrorCode::UserNotFound => "User not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::MailDispatchFailed => "Mail dispatch failed",
            ErrorCode::NotifyQueueFull => "Notification queue is full",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::InvalidFormat,
            7 => ErrorCode::RequiredField,
            8 => ErrorCode::ValueOutOfRange,

            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,
            1005 => ErrorCode::AccountDisabled,

            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::AdminRequired,

            4001 => ErrorCode::BookingNotFound,
            4002 => ErrorCode::BookingConflict,
            4003 => ErrorCode::InvalidStatusTransition,
            4004 => ErrorCode::DurationOutOfRange,
            4005 => ErrorCode::OutsideOpeningHours,
            4006 => ErrorCode::EmptyResourceSelection,

            5001 => ErrorCode::PaymentFailed,
            5002 => ErrorCode::PaymentDeclined,
            5003 => ErrorCode::RefundExceedsAmount,
            5004 => ErrorCode::PaymentGatewayUnavailable,

            6001 => ErrorCode::RoomNotFound,
            6002 => ErrorCode::RoomNameExists,
            6003 => ErrorCode::RoomInactive,
            6101 => ErrorCode::LayoutNotFound,
            6102 => ErrorCode::ChairNotInLayout,
            6103 => ErrorCode::ChairLabelExists,

            7001 => ErrorCode::SettingsNotFound,

            8001 => ErrorCode::StaffNotFound,
            8002 => ErrorCode::StaffNameExists,
            8003 => ErrorCode::StaffIsSystem,
            8004 => ErrorCode::StaffCannotDeleteSelf,
            8101 => ErrorCode::UserNotFound,

            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9003 => ErrorCode::NetworkError,
            9004 => ErrorCode::TimeoutError,
            9005 => ErrorCode::ConfigError,
            9101 => ErrorCode::MailDispatchFailed,
            9102 => ErrorCode::NotifyQueueFull,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::BookingConflict.code(), 4002);
        assert_eq!(ErrorCode::PaymentFailed.code(), 5001);
        assert_eq!(ErrorCode::RoomNotFound.code(), 6001);
        assert_eq!(ErrorCode::StaffNotFound.code(), 8001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::BookingConflict.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0).unwrap(), ErrorCode::Success);
        assert_eq!(ErrorCode::try_from(4002).unwrap(), ErrorCode::BookingConflict);
        assert_eq!(ErrorCode::try_from(9002).unwrap(), ErrorCode::DatabaseError);
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
        assert_eq!(ErrorCode::try_from(4444), Err(InvalidErrorCode(4444)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&ErrorCode::BookingConflict).unwrap();
        assert_eq!(json, "4002");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorCode::BookingConflict);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::BookingNotFound.message(), "Booking not found");
        assert_eq!(
            ErrorCode::InvalidCredentials.message(),
            "Invalid staff name or PIN"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::BookingConflict), "4002");
    }
}
