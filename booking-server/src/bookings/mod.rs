//! Booking lifecycle
//!
//! Creation (validation → per-resource locks → availability → pricing →
//! persist → notify) and the guarded status state machine.

pub mod manager;
pub mod pricing;

pub use manager::BookingManager;
