//! Service facade composing the repositories with the engine.
//!
//! Validation lives at the repository creation boundaries and the
//! interesting computation lives in the engine; the scheduler wires
//! snapshots into engine calls and adds service-level logging.

use slotwise_engine::{available_slots, FreeSlot, QueryRange, WeeklyRule};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{AvailabilityRule, Booking, BookingRequest, Calendar};
use crate::repo::{BookingRepository, CalendarRepository};

/// Scheduling service for single-owner calendars.
pub struct Scheduler<C, B> {
    calendars: C,
    bookings: B,
}

impl<C: CalendarRepository, B: BookingRepository> Scheduler<C, B> {
    pub fn new(calendars: C, bookings: B) -> Self {
        Self { calendars, bookings }
    }

    // ── Calendars ──────────────────────────────────────────────────────

    pub fn create_calendar(&self, owner_id: Uuid) -> Result<Calendar> {
        let calendar = self.calendars.create(owner_id)?;
        info!(%owner_id, calendar_id = %calendar.id, "calendar created");
        Ok(calendar)
    }

    pub fn calendar(&self, owner_id: Uuid) -> Result<Calendar> {
        self.calendars.find_by_owner(owner_id)
    }

    pub fn delete_calendar(&self, owner_id: Uuid) -> Result<()> {
        self.calendars.delete(owner_id)?;
        info!(%owner_id, "calendar deleted");
        Ok(())
    }

    // ── Availability rules ─────────────────────────────────────────────

    pub fn add_rule(&self, owner_id: Uuid, rule: WeeklyRule) -> Result<AvailabilityRule> {
        let stored = self.calendars.add_rule(owner_id, rule)?;
        info!(%owner_id, rule_id = %stored.id, day = %rule.day_of_week, "availability rule added");
        Ok(stored)
    }

    pub fn update_rule(
        &self,
        owner_id: Uuid,
        rule_id: Uuid,
        rule: WeeklyRule,
    ) -> Result<AvailabilityRule> {
        let stored = self.calendars.update_rule(owner_id, rule_id, rule)?;
        info!(%owner_id, %rule_id, "availability rule updated");
        Ok(stored)
    }

    pub fn remove_rule(&self, owner_id: Uuid, rule_id: Uuid) -> Result<()> {
        self.calendars.remove_rule(owner_id, rule_id)?;
        info!(%owner_id, %rule_id, "availability rule removed");
        Ok(())
    }

    pub fn rules(&self, owner_id: Uuid) -> Result<Vec<AvailabilityRule>> {
        self.calendars.rules(owner_id)
    }

    // ── Availability queries ───────────────────────────────────────────

    /// Free slots for `owner_id` within `range`: active rules projected
    /// onto the range, minus bookings overlapping it.
    pub fn free_slots(&self, owner_id: Uuid, range: &QueryRange) -> Result<Vec<FreeSlot>> {
        let rules = self.calendars.active_rules(owner_id)?;
        let bookings = self.bookings.intervals_overlapping(owner_id, range);
        let slots = available_slots(&rules, &bookings, range, owner_id)?;
        debug!(
            %owner_id,
            rules = rules.len(),
            bookings = bookings.len(),
            slots = slots.len(),
            "availability resolved"
        );
        Ok(slots)
    }

    // ── Bookings ───────────────────────────────────────────────────────

    /// Book a slot. Conflict checking and insertion are atomic per owner
    /// inside the repository (see [`BookingRepository::try_insert`]).
    pub fn book(&self, request: BookingRequest) -> Result<Booking> {
        let owner_id = request.owner_id;
        match self.bookings.try_insert(request) {
            Ok(booking) => {
                info!(%owner_id, booking_id = %booking.id, "booking accepted");
                Ok(booking)
            }
            Err(err) => {
                warn!(%owner_id, error = %err, "booking rejected");
                Err(err)
            }
        }
    }

    pub fn confirm(&self, owner_id: Uuid, booking_id: Uuid) -> Result<Booking> {
        let booking = self.bookings.confirm(owner_id, booking_id)?;
        info!(%owner_id, %booking_id, "booking confirmed");
        Ok(booking)
    }

    pub fn cancel(&self, owner_id: Uuid, booking_id: Uuid) -> Result<()> {
        self.bookings.delete(owner_id, booking_id)?;
        info!(%owner_id, %booking_id, "booking cancelled");
        Ok(())
    }

    pub fn bookings(&self, owner_id: Uuid) -> Vec<Booking> {
        self.bookings.for_owner(owner_id)
    }

    pub fn booking(&self, owner_id: Uuid, booking_id: Uuid) -> Result<Booking> {
        self.bookings.find(owner_id, booking_id)
    }

    pub fn booking_by_correlation(&self, owner_id: Uuid, correlation_id: Uuid) -> Result<Booking> {
        self.bookings.find_by_correlation(owner_id, correlation_id)
    }
}
