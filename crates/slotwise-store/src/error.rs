//! Error types for the storage and service layer.

use chrono::NaiveDateTime;
use slotwise_engine::EngineError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("calendar not found for owner {0}")]
    CalendarNotFound(Uuid),

    #[error("calendar already exists for owner {0}")]
    CalendarExists(Uuid),

    #[error("availability rule {0} not found")]
    RuleNotFound(Uuid),

    #[error("booking {0} not found")]
    BookingNotFound(Uuid),

    /// A booking was submitted with `start >= end`. Interval invariants are
    /// enforced here, at the creation boundary, so the engine can assume
    /// well-formed snapshots.
    #[error("invalid interval: end ({end}) must be strictly after start ({start})")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Verdicts from the engine (range/rule validation, slot conflicts,
    /// duplicate correlations) pass through unchanged.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Convenience alias used throughout slotwise-store.
pub type Result<T> = std::result::Result<T, StoreError>;
