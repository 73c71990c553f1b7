//! Booking conflict check.
//!
//! Decides whether a proposed booking may be accepted against an owner's
//! existing bookings. Pure — persistence, and the serialization that keeps
//! check-then-write atomic, belong to the caller.

use crate::error::{EngineError, Result};
use crate::interval::BookedInterval;

/// Check a proposed booking against `existing` bookings.
///
/// Only intervals with the proposal's owner participate; bookings for
/// different owners never conflict here.
///
/// # Errors
/// Returns [`EngineError::DuplicateCorrelation`] when the owner already
/// holds a booking with the proposal's correlation id — checked first and
/// independent of time overlap, so the duplicate verdict is deterministic
/// when both rules would fire. Returns [`EngineError::SlotConflict`] when
/// the proposal overlaps any same-owner interval; touching endpoints do
/// not conflict.
pub fn check_conflict(proposed: &BookedInterval, existing: &[BookedInterval]) -> Result<()> {
    let same_owner = || existing.iter().filter(|b| b.owner_id == proposed.owner_id);

    if let Some(dup) = same_owner().find(|b| b.correlation_id == proposed.correlation_id) {
        return Err(EngineError::DuplicateCorrelation {
            correlation_id: dup.correlation_id,
        });
    }

    for booked in same_owner() {
        // Two intervals overlap iff a.start < b.end AND b.start < a.end.
        // This excludes the adjacent case where one ends as the other starts.
        if proposed.start < booked.end && booked.start < proposed.end {
            return Err(EngineError::SlotConflict {
                start: booked.start,
                end: booked.end,
            });
        }
    }

    Ok(())
}
