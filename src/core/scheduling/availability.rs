//! Availability-window check
//!
//! A candidate instant is bookable iff its UTC weekday is one of the
//! doctor's active days and its time-of-day lies within the daily window,
//! inclusive on both ends. Comparison happens at `HH:MM:SS` granularity:
//! any sub-second component of the candidate is truncated first, matching
//! the stored window resolution.

use crate::domain::doctor::Availability;
use chrono::{DateTime, NaiveTime, Timelike, Utc};

/// Whether `candidate` falls inside the availability window
pub fn is_within_availability(availability: &Availability, candidate: DateTime<Utc>) -> bool {
    if !availability.contains_day(candidate) {
        return false;
    }

    let time_of_day = truncate_to_seconds(candidate.time());
    availability.start_time <= time_of_day && time_of_day <= availability.end_time
}

/// Human-readable reason for a rejected candidate, for the error message
///
/// Mirrors the two failure messages of the original boundary: wrong day vs
/// outside working hours. Returns `None` when the candidate is acceptable.
pub fn availability_violation(
    availability: &Availability,
    candidate: DateTime<Utc>,
) -> Option<String> {
    if !availability.contains_day(candidate) {
        return Some("Doctor is not available on this day".to_string());
    }
    let time_of_day = truncate_to_seconds(candidate.time());
    if time_of_day < availability.start_time || availability.end_time < time_of_day {
        return Some("Appointment time is outside doctor's working hours".to_string());
    }
    None
}

fn truncate_to_seconds(t: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(t.hour(), t.minute(), t.second()).unwrap_or(t)
}
