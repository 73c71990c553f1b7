//! Recurring weekly availability rules.
//!
//! A rule is a closed set of variants over day-of-week plus a same-day
//! wall-clock window. Rules never span midnight; multi-day coverage comes
//! from multiple rules.

use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Day of the week as an enumerated tag, `Mon` through `Sun`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Mon => Weekday::Mon,
            DayOfWeek::Tue => Weekday::Tue,
            DayOfWeek::Wed => Weekday::Wed,
            DayOfWeek::Thu => Weekday::Thu,
            DayOfWeek::Fri => Weekday::Fri,
            DayOfWeek::Sat => Weekday::Sat,
            DayOfWeek::Sun => Weekday::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
            DayOfWeek::Sat => "Sat",
            DayOfWeek::Sun => "Sun",
        };
        f.write_str(name)
    }
}

/// A recurring weekly availability window.
///
/// Invariant: `start_time < end_time`. The window is instantiated on every
/// calendar date whose weekday matches `day_of_week`; inactive rules are
/// skipped by projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRule {
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: bool,
}

impl WeeklyRule {
    /// Check the `start_time < end_time` invariant.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidRule`] when the window is empty or
    /// reversed.
    pub fn validate(&self) -> Result<()> {
        if self.start_time >= self.end_time {
            return Err(EngineError::InvalidRule {
                day_of_week: self.day_of_week,
                start_time: self.start_time,
                end_time: self.end_time,
            });
        }
        Ok(())
    }
}
