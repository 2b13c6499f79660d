//! Database model definitions
//!
//! Each entity has a storage struct plus Create/Update payload structs.
//! RecordIds serialize as "table:id" strings over the API.

pub mod booking;
pub mod layout;
pub mod room;
pub mod serde_helpers;
pub mod settings;
pub mod staff;
pub mod user;

pub use booking::{Booking, BookingCreate, BookingUpdate};
pub use layout::{CafeLayout, Chair, LayoutUpdate};
pub use room::{Room, RoomCreate, RoomUpdate};
pub use settings::{Settings, SettingsUpdate};
pub use staff::{Staff, StaffCreate, StaffUpdate};
pub use user::{User, UserUpsert};
