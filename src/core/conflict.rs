use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{ExistingReservation, ProposedInterval};

/// Scheduling validation failures raised before a conflict check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("End time must be after start time")]
    InvalidInterval,

    #[error("Start time {start} is in the past (now: {now})")]
    StartInPast {
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

/// Validate a requested interval against the current instant
///
/// The end must be strictly after the start, and the start must not lie
/// before `now`. Starting exactly at `now` is allowed.
pub fn validate_interval(proposed: &ProposedInterval, now: DateTime<Utc>) -> Result<(), ScheduleError> {
    if proposed.end <= proposed.start {
        return Err(ScheduleError::InvalidInterval);
    }
    if proposed.start < now {
        return Err(ScheduleError::StartInPast {
            start: proposed.start,
            now,
        });
    }
    Ok(())
}

/// Check whether a single reservation collides with the proposed interval
///
/// Bounds are inclusive, so intervals that touch at one instant collide.
#[inline]
fn overlaps(existing: &ExistingReservation, proposed: &ProposedInterval) -> bool {
    // Existing covers the proposed start
    (existing.start <= proposed.start && existing.end >= proposed.start)
        // Existing covers the proposed end
        || (existing.start <= proposed.end && existing.end >= proposed.end)
        // Existing lies inside the proposed interval
        || (existing.start >= proposed.start && existing.end <= proposed.end)
}

/// Return every active reservation that overlaps the proposed interval
///
/// Only pending and approved reservations are considered. The caller is
/// expected to pass the reservations of the party being booked.
pub fn find_conflicts<'a>(
    proposed: &ProposedInterval,
    existing: &'a [ExistingReservation],
) -> Vec<&'a ExistingReservation> {
    existing
        .iter()
        .filter(|reservation| reservation.status.is_active())
        .filter(|reservation| overlaps(reservation, proposed))
        .collect()
}

/// Check if the proposed interval overlaps any active reservation
pub fn has_conflict(proposed: &ProposedInterval, existing: &[ExistingReservation]) -> bool {
    existing
        .iter()
        .filter(|reservation| reservation.status.is_active())
        .any(|reservation| overlaps(reservation, proposed))
}
