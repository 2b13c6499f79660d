//! Booking domain enums
//!
//! Shared by the server and its clients: service types, the booking status
//! state machine, and payment status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bookable service type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Karaoke room
    Karaoke,
    /// Retro-gaming booth
    Gaming,
    /// Café seating (individual chairs)
    Cafe,
}

impl ServiceType {
    /// Stable string form, matches the serde representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Karaoke => "karaoke",
            ServiceType::Gaming => "gaming",
            ServiceType::Cafe => "cafe",
        }
    }

    /// Whether resources of this type are rooms (vs café chairs)
    pub const fn is_room(&self) -> bool {
        matches!(self, ServiceType::Karaoke | ServiceType::Gaming)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking lifecycle status
///
/// Typed state machine — only the transitions in [`BookingStatus::can_transition`]
/// are legal. There is no way out of `cancelled` or `completed`.
///
/// ```text
/// pending ──→ confirmed ──→ completed
///    │             │
///    └──→ cancelled ←──┘
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, awaiting payment confirmation
    #[default]
    Pending,
    /// Payment confirmed (or zero-price)
    Confirmed,
    /// Cancelled by customer or staff
    Cancelled,
    /// Visit finished
    Completed,
}

impl BookingStatus {
    /// Stable string form, matches the serde representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Whether a booking in this status blocks its resources
    /// (only pending and confirmed bookings constrain availability)
    pub const fn blocks_resources(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Whether this is a terminal status
    pub const fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// Transition table for the booking state machine
    pub const fn can_transition(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status as reported by the payment processor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No payment recorded yet
    #[default]
    Unpaid,
    /// Processor reported success
    Succeeded,
    /// Processor reported failure
    Failed,
    /// Payment was refunded
    Refunded,
}

impl PaymentStatus {
    /// Stable string form, matches the serde representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    /// Whether the payment is settled successfully
    pub const fn is_success(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
