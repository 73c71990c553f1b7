//! In-memory repository implementations.
//!
//! Both repositories key their data by owner id in a [`DashMap`], so
//! operations on different owners proceed in parallel while operations on
//! one owner's bucket serialize on its shard lock.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use slotwise_engine::{check_conflict, BookedInterval, QueryRange, WeeklyRule};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::model::{now, AvailabilityRule, Booking, BookingRequest, Calendar};
use crate::repo::{BookingRepository, CalendarRepository};

/// Calendars and rules, keyed by owner id.
#[derive(Debug, Default)]
pub struct InMemoryCalendars {
    calendars: DashMap<Uuid, Calendar>,
    rules: DashMap<Uuid, Vec<AvailabilityRule>>,
}

impl InMemoryCalendars {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CalendarRepository for InMemoryCalendars {
    fn create(&self, owner_id: Uuid) -> Result<Calendar> {
        match self.calendars.entry(owner_id) {
            Entry::Occupied(_) => Err(StoreError::CalendarExists(owner_id)),
            Entry::Vacant(vacant) => {
                let created = now();
                let calendar = Calendar {
                    id: Uuid::new_v4(),
                    owner_id,
                    created_at: created,
                    updated_at: created,
                };
                vacant.insert(calendar.clone());
                Ok(calendar)
            }
        }
    }

    fn find_by_owner(&self, owner_id: Uuid) -> Result<Calendar> {
        self.calendars
            .get(&owner_id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::CalendarNotFound(owner_id))
    }

    fn delete(&self, owner_id: Uuid) -> Result<()> {
        self.calendars
            .remove(&owner_id)
            .ok_or(StoreError::CalendarNotFound(owner_id))?;
        self.rules.remove(&owner_id);
        Ok(())
    }

    fn add_rule(&self, owner_id: Uuid, rule: WeeklyRule) -> Result<AvailabilityRule> {
        let calendar = self.find_by_owner(owner_id)?;
        rule.validate()?;

        let created = now();
        let stored = AvailabilityRule {
            id: Uuid::new_v4(),
            calendar_id: calendar.id,
            rule,
            created_at: created,
            updated_at: created,
        };
        self.rules.entry(owner_id).or_default().push(stored.clone());
        Ok(stored)
    }

    fn update_rule(
        &self,
        owner_id: Uuid,
        rule_id: Uuid,
        rule: WeeklyRule,
    ) -> Result<AvailabilityRule> {
        self.find_by_owner(owner_id)?;
        rule.validate()?;

        let mut rules = self
            .rules
            .get_mut(&owner_id)
            .ok_or(StoreError::RuleNotFound(rule_id))?;
        let stored = rules
            .iter_mut()
            .find(|r| r.id == rule_id)
            .ok_or(StoreError::RuleNotFound(rule_id))?;

        stored.rule = rule;
        stored.updated_at = now();
        Ok(stored.clone())
    }

    fn remove_rule(&self, owner_id: Uuid, rule_id: Uuid) -> Result<()> {
        let mut rules = self
            .rules
            .get_mut(&owner_id)
            .ok_or(StoreError::RuleNotFound(rule_id))?;
        let before = rules.len();
        rules.retain(|r| r.id != rule_id);
        if rules.len() == before {
            return Err(StoreError::RuleNotFound(rule_id));
        }
        Ok(())
    }

    fn rules(&self, owner_id: Uuid) -> Result<Vec<AvailabilityRule>> {
        self.find_by_owner(owner_id)?;
        Ok(self
            .rules
            .get(&owner_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    fn active_rules(&self, owner_id: Uuid) -> Result<Vec<WeeklyRule>> {
        Ok(self
            .rules(owner_id)?
            .into_iter()
            .filter(|r| r.rule.active)
            .map(|r| r.rule)
            .collect())
    }
}

/// Bookings, keyed by owner id.
#[derive(Debug, Default)]
pub struct InMemoryBookings {
    by_owner: DashMap<Uuid, Vec<Booking>>,
}

impl InMemoryBookings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingRepository for InMemoryBookings {
    fn try_insert(&self, request: BookingRequest) -> Result<Booking> {
        if request.start >= request.end {
            return Err(StoreError::InvalidInterval {
                start: request.start,
                end: request.end,
            });
        }

        // The entry guard holds this owner's bucket exclusively for the
        // whole check-then-insert sequence; two overlapping requests for
        // one owner cannot both pass the conflict check.
        let mut bucket = self.by_owner.entry(request.owner_id).or_default();

        let proposed = BookedInterval {
            owner_id: request.owner_id,
            correlation_id: request.correlation_id,
            start: request.start,
            end: request.end,
        };
        let existing: Vec<BookedInterval> = bucket.iter().map(Booking::interval).collect();
        check_conflict(&proposed, &existing)?;

        let created = now();
        let booking = Booking {
            id: Uuid::new_v4(),
            owner_id: request.owner_id,
            correlation_id: request.correlation_id,
            start: request.start,
            end: request.end,
            title: request.title,
            notes: request.notes,
            confirmed: false,
            created_at: created,
            updated_at: created,
        };
        bucket.push(booking.clone());
        Ok(booking)
    }

    fn find(&self, owner_id: Uuid, booking_id: Uuid) -> Result<Booking> {
        self.by_owner
            .get(&owner_id)
            .and_then(|bucket| bucket.iter().find(|b| b.id == booking_id).cloned())
            .ok_or(StoreError::BookingNotFound(booking_id))
    }

    fn find_by_correlation(&self, owner_id: Uuid, correlation_id: Uuid) -> Result<Booking> {
        self.by_owner
            .get(&owner_id)
            .and_then(|bucket| {
                bucket
                    .iter()
                    .find(|b| b.correlation_id == correlation_id)
                    .cloned()
            })
            .ok_or(StoreError::BookingNotFound(correlation_id))
    }

    fn for_owner(&self, owner_id: Uuid) -> Vec<Booking> {
        let mut bookings = self
            .by_owner
            .get(&owner_id)
            .map(|bucket| bucket.value().clone())
            .unwrap_or_default();
        bookings.sort_by_key(|b| (b.start, b.end));
        bookings
    }

    fn intervals_overlapping(&self, owner_id: Uuid, range: &QueryRange) -> Vec<BookedInterval> {
        self.by_owner
            .get(&owner_id)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|b| b.start < range.end && b.end > range.start)
                    .map(Booking::interval)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn confirm(&self, owner_id: Uuid, booking_id: Uuid) -> Result<Booking> {
        let mut bucket = self
            .by_owner
            .get_mut(&owner_id)
            .ok_or(StoreError::BookingNotFound(booking_id))?;
        let booking = bucket
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or(StoreError::BookingNotFound(booking_id))?;

        booking.confirmed = true;
        booking.updated_at = now();
        Ok(booking.clone())
    }

    fn delete(&self, owner_id: Uuid, booking_id: Uuid) -> Result<()> {
        let mut bucket = self
            .by_owner
            .get_mut(&owner_id)
            .ok_or(StoreError::BookingNotFound(booking_id))?;
        let before = bucket.len();
        bucket.retain(|b| b.id != booking_id);
        if bucket.len() == before {
            return Err(StoreError::BookingNotFound(booking_id));
        }
        Ok(())
    }
}
