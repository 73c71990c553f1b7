//! Weekly pattern projection — rules → dated candidate slots.
//!
//! Walks each calendar day of the query range, instantiates every active
//! rule whose weekday matches, and clips the result to the range. Clipping
//! (rather than dropping slots that touch a range boundary) keeps the
//! half-open contract exact: a partially covered window survives as its
//! covered portion.

use chrono::Datelike;

use crate::error::Result;
use crate::interval::{CandidateSlot, QueryRange};
use crate::rule::{DayOfWeek, WeeklyRule};

/// Expand `rules` onto every matching calendar date within `range`.
///
/// Only rules with `active == true` participate. Output is sorted by
/// `(start, end)` ascending and is deterministic for identical inputs.
///
/// # Errors
/// Returns `EngineError::InvalidRange` when `range.start >= range.end`,
/// and `EngineError::InvalidRule` when any participating rule has an
/// empty or reversed window.
pub fn project(rules: &[WeeklyRule], range: &QueryRange) -> Result<Vec<CandidateSlot>> {
    range.validate()?;

    let active: Vec<&WeeklyRule> = rules.iter().filter(|r| r.active).collect();
    for rule in &active {
        rule.validate()?;
    }

    let mut candidates = Vec::new();
    let mut day = range.start.date();
    let last_day = range.end.date();

    // The final date participates only when the range extends past midnight
    // into it; clipping below discards the empty intersections.
    loop {
        let weekday = DayOfWeek::from(day.weekday());
        for rule in active.iter().filter(|r| r.day_of_week == weekday) {
            let start = day.and_time(rule.start_time).max(range.start);
            let end = day.and_time(rule.end_time).min(range.end);
            if start < end {
                candidates.push(CandidateSlot { start, end });
            }
        }

        if day >= last_day {
            break;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break, // calendar overflow, nothing further to project
        };
    }

    candidates.sort_by_key(|c| (c.start, c.end));
    Ok(candidates)
}
