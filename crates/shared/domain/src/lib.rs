//! # Domain Models
//!
//! Pure data types shared by every slice of the reservation client: time slots and their
//! date-grouped form, the user profile and audit status, route requirements and client config.
//! Keep it lean: no I/O or networking here, just data and parsing helpers.

pub mod config;
pub mod constants;
pub mod profile;
pub mod route;
pub mod slot;

pub use profile::{AuditStatus, UserProfile, UserSession};
pub use route::RouteRequirement;
pub use slot::{Slot, SlotGroup, SlotParseError, TimeSlot};
