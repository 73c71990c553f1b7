//! Repository traits at the engine's interface boundary.
//!
//! The engine consumes rule and booking snapshots; these traits are where
//! those snapshots come from. Implementations must be safe to share across
//! threads — the in-memory ones in [`crate::memory`] are, and a
//! database-backed implementation would be too.

use slotwise_engine::{BookedInterval, QueryRange, WeeklyRule};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{AvailabilityRule, Booking, BookingRequest, Calendar};

/// Storage for calendars and their weekly availability rules.
pub trait CalendarRepository: Send + Sync {
    /// Create the calendar for `owner_id`. Fails with `CalendarExists` if
    /// the owner already has one.
    fn create(&self, owner_id: Uuid) -> Result<Calendar>;

    fn find_by_owner(&self, owner_id: Uuid) -> Result<Calendar>;

    /// Delete the owner's calendar together with its rules.
    fn delete(&self, owner_id: Uuid) -> Result<()>;

    /// Attach a rule to the owner's calendar. The rule's window is
    /// validated here — this is the creation boundary the engine relies on.
    fn add_rule(&self, owner_id: Uuid, rule: WeeklyRule) -> Result<AvailabilityRule>;

    /// Replace the window/day/active flag of an existing rule.
    fn update_rule(&self, owner_id: Uuid, rule_id: Uuid, rule: WeeklyRule)
        -> Result<AvailabilityRule>;

    fn remove_rule(&self, owner_id: Uuid, rule_id: Uuid) -> Result<()>;

    /// All stored rules for the owner, active or not.
    fn rules(&self, owner_id: Uuid) -> Result<Vec<AvailabilityRule>>;

    /// Snapshot of the owner's active rules, ready for projection.
    fn active_rules(&self, owner_id: Uuid) -> Result<Vec<WeeklyRule>>;
}

/// Storage for bookings.
pub trait BookingRepository: Send + Sync {
    /// Atomically check the request against the owner's existing bookings
    /// and insert it. The check and the insert happen inside one per-owner
    /// critical section: two concurrent overlapping requests for the same
    /// owner cannot both succeed.
    fn try_insert(&self, request: BookingRequest) -> Result<Booking>;

    fn find(&self, owner_id: Uuid, booking_id: Uuid) -> Result<Booking>;

    fn find_by_correlation(&self, owner_id: Uuid, correlation_id: Uuid) -> Result<Booking>;

    /// All bookings for the owner, sorted by `(start, end)`.
    fn for_owner(&self, owner_id: Uuid) -> Vec<Booking>;

    /// Engine-facing snapshot of the owner's bookings overlapping `range`
    /// (half-open overlap — a booking straddling a range edge is included).
    fn intervals_overlapping(&self, owner_id: Uuid, range: &QueryRange) -> Vec<BookedInterval>;

    /// Mark a booking confirmed.
    fn confirm(&self, owner_id: Uuid, booking_id: Uuid) -> Result<Booking>;

    fn delete(&self, owner_id: Uuid, booking_id: Uuid) -> Result<()>;
}
