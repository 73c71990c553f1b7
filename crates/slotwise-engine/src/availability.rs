//! Projection and resolution composed into a single availability query.
//!
//! This is the engine's top-level operation: the caller hands over rule
//! and booking snapshots for one owner plus a query range, and gets back
//! the exact list of open, bookable intervals.

use uuid::Uuid;

use crate::error::Result;
use crate::interval::{BookedInterval, FreeSlot, QueryRange};
use crate::projector::project;
use crate::resolver::resolve;
use crate::rule::WeeklyRule;

/// Compute the free slots for `owner_id` within `range`.
///
/// Equivalent to [`project`] followed by [`resolve`]; see those for the
/// individual contracts.
///
/// # Errors
/// Propagates projection errors (`InvalidRange`, `InvalidRule`).
pub fn available_slots(
    rules: &[WeeklyRule],
    bookings: &[BookedInterval],
    range: &QueryRange,
    owner_id: Uuid,
) -> Result<Vec<FreeSlot>> {
    let candidates = project(rules, range)?;
    Ok(resolve(&candidates, bookings, owner_id))
}
