//! Concrete time intervals exchanged with the engine.
//!
//! Every interval here is half-open `[start, end)`: the start instant is
//! included, the end instant is not. Touching endpoints never overlap.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, Result};

/// The date range of an availability query, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl QueryRange {
    /// Check the `start < end` invariant.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidRange`] for a zero or negative length
    /// range — a malformed query, distinct from a query that finds nothing.
    pub fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(EngineError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// A dated instantiation of a weekly rule, already clipped to the query
/// range. Ephemeral projection output, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// An already-reserved, non-recurring time span for one owner.
///
/// `correlation_id` ties the booking to the exchange that originated it;
/// each owner may hold at most one booking per correlation id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub owner_id: Uuid,
    pub correlation_id: Uuid,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A bookable portion of a candidate slot not covered by any booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub owner_id: Uuid,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl FreeSlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}
