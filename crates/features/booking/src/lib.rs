//! # Booking
//!
//! Client-side model of time-slot bookings for shared resources (equipment, cages,
//! experiment operation). The backend owns availability; this crate only represents,
//! transforms and displays slot data:
//!
//! * [`codec`]: wire slots ⇄ date-grouped selections, plus display and confirmation texts.
//!   `flatten(group(s)) == sort(s)` for well-formed, duplicate-free input.
//! * [`period`]: reservation date ranges, including open-ended long-term ones.
//! * [`AvailabilityQuery`]: lookup parameters with explicit self-exclusion on edit.
//! * [`AdvanceDays`]: how far ahead each [`ResourceKind`] may be booked.
//! * [`BookingApi`]: the booking endpoints over the request gateway.

mod advance;
mod api;
mod availability;
pub mod codec;
mod error;
pub mod orders;
pub mod period;

pub use advance::{AdvanceDays, ResourceKind};
pub use api::{BookingApi, CageAvailability, OrderDraft};
pub use availability::AvailabilityQuery;
pub use error::{BookingError, BookingErrorExt};
pub use period::ReservationPeriod;
