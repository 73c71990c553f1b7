//! # slotwise-engine
//!
//! Pure availability resolution for single-owner calendars.
//!
//! The engine turns a set of recurring weekly availability rules and a set of
//! already-booked intervals into the concrete, bookable time slots inside an
//! arbitrary date range. All date-times are naive wall-clock values in one
//! implicit zone; all intervals are half-open `[start, end)`.
//!
//! Every operation is a pure function of its inputs — no I/O, no interior
//! mutability, safe to call concurrently.
//!
//! ## Modules
//!
//! - [`projector`] — weekly rules → dated candidate slots within a range
//! - [`resolver`] — candidate slots minus booked intervals → free slots
//! - [`conflict`] — overlap/duplicate check for a proposed booking
//! - [`availability`] — projection and resolution composed into one call
//! - [`error`] — error types

pub mod availability;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod projector;
pub mod resolver;
pub mod rule;

pub use availability::available_slots;
pub use conflict::check_conflict;
pub use error::EngineError;
pub use interval::{BookedInterval, CandidateSlot, FreeSlot, QueryRange};
pub use projector::project;
pub use resolver::resolve;
pub use rule::{DayOfWeek, WeeklyRule};
