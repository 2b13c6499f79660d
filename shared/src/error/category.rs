//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 4xxx: Booking errors
/// - 5xxx: Payment errors
/// - 6xxx: Resource errors
/// - 7xxx: Settings errors
/// - 8xxx: Staff / user errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Booking errors (4xxx)
    Booking,
    /// Payment errors (5xxx)
    Payment,
    /// Resource errors (6xxx)
    Resource,
    /// Settings errors (7xxx)
    Settings,
    /// Staff / user errors (8xxx)
    Staff,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Booking,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Resource,
            7000..8000 => Self::Settings,
            8000..9000 => Self::Staff,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    /// Get the category of this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::PermissionDenied.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::BookingConflict.category(), ErrorCategory::Booking);
        assert_eq!(ErrorCode::PaymentFailed.category(), ErrorCategory::Payment);
        assert_eq!(ErrorCode::RoomNotFound.category(), ErrorCategory::Resource);
        assert_eq!(ErrorCode::SettingsNotFound.category(), ErrorCategory::Settings);
        assert_eq!(ErrorCode::StaffNotFound.category(), ErrorCategory::Staff);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }
}
