//! Free-slot resolution — candidate slots minus booked intervals.
//!
//! Sorts the owner's bookings once, then sweeps a cursor across each
//! candidate. A booking overlapping the candidate's interior bisects it;
//! bookings overlapping an edge shave it. Fragments that collapse to zero
//! length are discarded.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::interval::{BookedInterval, CandidateSlot, FreeSlot};

/// Subtract `bookings` belonging to `owner_id` from `candidates`, returning
/// the remaining free sub-intervals.
///
/// Bookings for other owners are ignored. Input bookings may be unordered;
/// candidates are expected in projection order but any order is accepted.
/// Output is a flat list sorted by `(start, end)` ascending, each slot
/// tagged with `owner_id`.
pub fn resolve(
    candidates: &[CandidateSlot],
    bookings: &[BookedInterval],
    owner_id: Uuid,
) -> Vec<FreeSlot> {
    let mut booked: Vec<(NaiveDateTime, NaiveDateTime)> = bookings
        .iter()
        .filter(|b| b.owner_id == owner_id)
        .map(|b| (b.start, b.end))
        .collect();
    booked.sort_unstable();

    let mut free = Vec::new();
    for candidate in candidates {
        // Bookings starting at or after candidate.end cannot overlap it;
        // binary-search the sorted starts to bound the scan.
        let upper = booked.partition_point(|&(start, _)| start < candidate.end);

        let mut cursor = candidate.start;
        for &(start, end) in &booked[..upper] {
            if end <= cursor {
                // Ends at or before the unconsumed part — no overlap left.
                continue;
            }
            if start > cursor {
                // Free fragment before this booking.
                free.push(FreeSlot {
                    owner_id,
                    start: cursor,
                    end: start,
                });
            }
            cursor = cursor.max(end);
            if cursor >= candidate.end {
                break;
            }
        }

        // Tail fragment after the last overlapping booking.
        if cursor < candidate.end {
            free.push(FreeSlot {
                owner_id,
                start: cursor,
                end: candidate.end,
            });
        }
    }

    free.sort_by_key(|f| (f.start, f.end));
    free
}
