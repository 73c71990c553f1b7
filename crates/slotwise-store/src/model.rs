//! Persistent domain records.
//!
//! These wrap the engine's value types with identity and audit timestamps.
//! Repositories hand the engine read-only snapshots derived from them; the
//! engine never sees the records themselves.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use slotwise_engine::{BookedInterval, WeeklyRule};
use uuid::Uuid;

/// Wall-clock timestamp for audit fields.
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// One calendar per owner, holding that owner's availability rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A stored weekly availability rule attached to a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub calendar_id: Uuid,
    pub rule: WeeklyRule,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A reserved time span for one owner, created through the conflict check.
///
/// `correlation_id` identifies the originating exchange; at most one
/// booking per correlation id exists per owner. Bookings start
/// unconfirmed and are confirmed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub correlation_id: Uuid,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub confirmed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    /// The engine-facing snapshot of this booking.
    pub fn interval(&self) -> BookedInterval {
        BookedInterval {
            owner_id: self.owner_id,
            correlation_id: self.correlation_id,
            start: self.start,
            end: self.end,
        }
    }
}

/// Everything a caller supplies to create a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub owner_id: Uuid,
    pub correlation_id: Uuid,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
