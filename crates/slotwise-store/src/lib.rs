//! # slotwise-store
//!
//! Storage and service layer around [`slotwise_engine`].
//!
//! The engine is a pure function of its inputs; this crate owns everything
//! around it: domain records with identity and audit timestamps, repository
//! traits at the engine's interface boundary, in-memory repository
//! implementations, and the [`Scheduler`] service facade.
//!
//! The booking repository is where the check-then-act race is closed:
//! [`BookingRepository::try_insert`] runs the engine's conflict check and
//! the insert inside one per-owner critical section.
//!
//! ## Modules
//!
//! - [`model`] — calendars, availability rules, bookings
//! - [`repo`] — repository traits
//! - [`memory`] — in-memory repository implementations
//! - [`scheduler`] — service facade composing repositories and engine
//! - [`error`] — error types

pub mod error;
pub mod memory;
pub mod model;
pub mod repo;
pub mod scheduler;

pub use error::StoreError;
pub use memory::{InMemoryBookings, InMemoryCalendars};
pub use model::{AvailabilityRule, Booking, BookingRequest, Calendar};
pub use repo::{BookingRepository, CalendarRepository};
pub use scheduler::Scheduler;
