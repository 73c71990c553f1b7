//! Error types for engine operations.

use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use crate::rule::DayOfWeek;

/// Errors produced by projection and conflict checking. All are locally
/// recoverable; none indicate a broken process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The query range's end is not strictly after its start.
    #[error("invalid range: end ({end}) must be strictly after start ({start})")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// An active rule violated the `start_time < end_time` invariant. Rule
    /// data is validated at its creation boundary, so hitting this means the
    /// caller handed the engine an unchecked snapshot.
    #[error("invalid rule: {day_of_week} window {start_time}..{end_time} is empty or reversed")]
    InvalidRule {
        day_of_week: DayOfWeek,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },

    /// A proposed booking overlaps an existing booking for the same owner.
    /// Carries the existing interval it collided with.
    #[error("slot conflict: proposal overlaps existing booking {start}..{end}")]
    SlotConflict {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// A proposed booking reuses a correlation id already booked by that
    /// owner, independent of any time overlap.
    #[error("duplicate correlation id {correlation_id}: owner already has a booking for this exchange")]
    DuplicateCorrelation { correlation_id: Uuid },
}

/// Convenience alias used throughout slotwise-engine.
pub type Result<T> = std::result::Result<T, EngineError>;
