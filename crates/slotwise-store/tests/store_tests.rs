//! Integration tests for the repositories and the scheduler service.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slotwise_engine::{DayOfWeek, EngineError, QueryRange, WeeklyRule};
use slotwise_store::{
    BookingRepository, BookingRequest, InMemoryBookings, InMemoryCalendars, Scheduler, StoreError,
};
use uuid::Uuid;

/// Helper: a date-time in March 2026 (2026-03-02 is a Monday).
fn dt(day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn rule(day_of_week: DayOfWeek, start: (u32, u32), end: (u32, u32)) -> WeeklyRule {
    WeeklyRule {
        day_of_week,
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        active: true,
    }
}

fn request(owner_id: Uuid, start: NaiveDateTime, end: NaiveDateTime) -> BookingRequest {
    BookingRequest {
        owner_id,
        correlation_id: Uuid::new_v4(),
        start,
        end,
        title: None,
        notes: None,
    }
}

fn scheduler() -> Scheduler<InMemoryCalendars, InMemoryBookings> {
    Scheduler::new(InMemoryCalendars::new(), InMemoryBookings::new())
}

// ── Calendars and rules ─────────────────────────────────────────────────

#[test]
fn calendar_lifecycle() {
    let svc = scheduler();
    let owner = Uuid::new_v4();

    let calendar = svc.create_calendar(owner).unwrap();
    assert_eq!(calendar.owner_id, owner);
    assert_eq!(svc.calendar(owner).unwrap().id, calendar.id);

    // One calendar per owner.
    assert_eq!(
        svc.create_calendar(owner).unwrap_err(),
        StoreError::CalendarExists(owner)
    );

    svc.delete_calendar(owner).unwrap();
    assert_eq!(
        svc.calendar(owner).unwrap_err(),
        StoreError::CalendarNotFound(owner)
    );
}

#[test]
fn rule_crud_and_validation() {
    let svc = scheduler();
    let owner = Uuid::new_v4();
    svc.create_calendar(owner).unwrap();

    let stored = svc
        .add_rule(owner, rule(DayOfWeek::Mon, (9, 0), (17, 0)))
        .unwrap();
    assert_eq!(svc.rules(owner).unwrap().len(), 1);

    // Reversed window rejected at the creation boundary.
    let err = svc
        .add_rule(owner, rule(DayOfWeek::Tue, (17, 0), (9, 0)))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Engine(EngineError::InvalidRule { .. })
    ));

    // Update narrows the window.
    let updated = svc
        .update_rule(owner, stored.id, rule(DayOfWeek::Mon, (10, 0), (16, 0)))
        .unwrap();
    assert_eq!(
        updated.rule.start_time,
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    );

    svc.remove_rule(owner, stored.id).unwrap();
    assert!(svc.rules(owner).unwrap().is_empty());
    assert_eq!(
        svc.remove_rule(owner, stored.id).unwrap_err(),
        StoreError::RuleNotFound(stored.id)
    );
}

#[test]
fn rules_require_a_calendar() {
    let svc = scheduler();
    let owner = Uuid::new_v4();

    let err = svc
        .add_rule(owner, rule(DayOfWeek::Mon, (9, 0), (17, 0)))
        .unwrap_err();
    assert_eq!(err, StoreError::CalendarNotFound(owner));
}

// ── Bookings ────────────────────────────────────────────────────────────

#[test]
fn booking_lifecycle() {
    let svc = scheduler();
    let owner = Uuid::new_v4();

    let booking = svc.book(request(owner, dt(2, 10, 0), dt(2, 11, 0))).unwrap();
    assert!(!booking.confirmed);

    let confirmed = svc.confirm(owner, booking.id).unwrap();
    assert!(confirmed.confirmed);
    assert!(svc.booking(owner, booking.id).unwrap().confirmed);
    assert_eq!(
        svc.booking_by_correlation(owner, booking.correlation_id)
            .unwrap()
            .id,
        booking.id
    );

    svc.cancel(owner, booking.id).unwrap();
    assert_eq!(
        svc.booking(owner, booking.id).unwrap_err(),
        StoreError::BookingNotFound(booking.id)
    );
}

#[test]
fn overlapping_booking_rejected_for_same_owner_only() {
    let svc = scheduler();
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    svc.book(request(owner, dt(2, 10, 0), dt(2, 11, 0))).unwrap();

    let err = svc
        .book(request(owner, dt(2, 10, 30), dt(2, 11, 30)))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Engine(EngineError::SlotConflict { .. })
    ));

    // Identical time, different owner: no conflict.
    svc.book(request(other, dt(2, 10, 0), dt(2, 11, 0))).unwrap();
}

#[test]
fn duplicate_correlation_rejected() {
    let svc = scheduler();
    let owner = Uuid::new_v4();

    let mut first = request(owner, dt(2, 10, 0), dt(2, 11, 0));
    first.correlation_id = Uuid::from_u128(0xabc);
    svc.book(first).unwrap();

    // Disjoint in time but same originating exchange.
    let mut second = request(owner, dt(3, 10, 0), dt(3, 11, 0));
    second.correlation_id = Uuid::from_u128(0xabc);
    let err = svc.book(second).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Engine(EngineError::DuplicateCorrelation { .. })
    ));
}

#[test]
fn reversed_interval_rejected_at_creation() {
    let svc = scheduler();
    let owner = Uuid::new_v4();

    let err = svc.book(request(owner, dt(2, 11, 0), dt(2, 10, 0))).unwrap_err();
    assert!(matches!(err, StoreError::InvalidInterval { .. }));
}

#[test]
fn adjacent_bookings_accepted() {
    let svc = scheduler();
    let owner = Uuid::new_v4();

    svc.book(request(owner, dt(2, 10, 0), dt(2, 11, 0))).unwrap();
    svc.book(request(owner, dt(2, 11, 0), dt(2, 12, 0))).unwrap();

    let bookings = svc.bookings(owner);
    assert_eq!(bookings.len(), 2);
    assert!(bookings[0].start < bookings[1].start, "sorted by start");
}

// ── Availability through the service ────────────────────────────────────

#[test]
fn free_slots_end_to_end() {
    let svc = scheduler();
    let owner = Uuid::new_v4();
    svc.create_calendar(owner).unwrap();
    svc.add_rule(owner, rule(DayOfWeek::Mon, (9, 0), (17, 0)))
        .unwrap();
    svc.book(request(owner, dt(2, 12, 0), dt(2, 13, 0))).unwrap();

    let slots = svc
        .free_slots(
            owner,
            &QueryRange {
                start: dt(2, 0, 0),
                end: dt(3, 0, 0),
            },
        )
        .unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!((slots[0].start, slots[0].end), (dt(2, 9, 0), dt(2, 12, 0)));
    assert_eq!((slots[1].start, slots[1].end), (dt(2, 13, 0), dt(2, 17, 0)));
}

#[test]
fn free_slots_see_bookings_straddling_the_range() {
    // Booking 08:00-10:00 overlaps the range edge; the snapshot must
    // include it so the window still loses its first hour.
    let svc = scheduler();
    let owner = Uuid::new_v4();
    svc.create_calendar(owner).unwrap();
    svc.add_rule(owner, rule(DayOfWeek::Mon, (9, 0), (17, 0)))
        .unwrap();
    svc.book(request(owner, dt(2, 8, 0), dt(2, 10, 0))).unwrap();

    let slots = svc
        .free_slots(
            owner,
            &QueryRange {
                start: dt(2, 9, 0),
                end: dt(2, 17, 0),
            },
        )
        .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!((slots[0].start, slots[0].end), (dt(2, 10, 0), dt(2, 17, 0)));
}

#[test]
fn free_slots_require_a_calendar() {
    let svc = scheduler();
    let owner = Uuid::new_v4();

    let err = svc
        .free_slots(
            owner,
            &QueryRange {
                start: dt(2, 0, 0),
                end: dt(3, 0, 0),
            },
        )
        .unwrap_err();
    assert_eq!(err, StoreError::CalendarNotFound(owner));
}

#[test]
fn invalid_range_propagates_from_engine() {
    let svc = scheduler();
    let owner = Uuid::new_v4();
    svc.create_calendar(owner).unwrap();

    let err = svc
        .free_slots(
            owner,
            &QueryRange {
                start: dt(2, 0, 0),
                end: dt(2, 0, 0),
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Engine(EngineError::InvalidRange { .. })
    ));
}

// ── Concurrency ─────────────────────────────────────────────────────────

#[test]
fn concurrent_overlapping_bookings_one_winner() {
    // Many threads race to book the same hour for one owner; the per-owner
    // critical section in try_insert must let exactly one through.
    let repo = Arc::new(InMemoryBookings::new());
    let owner = Uuid::new_v4();

    let successes: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                scope.spawn(move || {
                    repo.try_insert(request(owner, dt(2, 10, 0), dt(2, 11, 0)))
                        .is_ok() as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(successes, 1, "exactly one racing booking may win");
    assert_eq!(repo.for_owner(owner).len(), 1);
}

#[test]
fn concurrent_bookings_for_different_owners_all_win() {
    let repo = Arc::new(InMemoryBookings::new());
    let owners: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();

    std::thread::scope(|scope| {
        for &owner in &owners {
            let repo = Arc::clone(&repo);
            scope.spawn(move || {
                repo.try_insert(request(owner, dt(2, 10, 0), dt(2, 11, 0)))
                    .unwrap();
            });
        }
    });

    for owner in owners {
        assert_eq!(repo.for_owner(owner).len(), 1);
    }
}
