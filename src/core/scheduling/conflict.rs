//! Scheduling conflict decision
//!
//! Appointments have no duration, so a slot is an exact (doctor, dateTime)
//! pair; there is no interval overlap to compute. Only non-terminal
//! statuses (`pending`, `approved`) hold a slot.
//!
//! This function is pure. Callers that enforce the double-booking invariant
//! must evaluate it atomically with their insert (see
//! [`crate::adapters::store::AppointmentStore::insert_appointment`]).

use crate::domain::appointment::Appointment;
use crate::domain::ids::{AppointmentId, DoctorId};
use chrono::{DateTime, Utc};

/// Whether booking `candidate` for `doctor_id` would double-book a slot
///
/// `excluding` skips the appointment currently being edited, so a reschedule
/// does not conflict with itself.
pub fn has_conflict(
    existing: &[&Appointment],
    doctor_id: &DoctorId,
    candidate: DateTime<Utc>,
    excluding: Option<&AppointmentId>,
) -> bool {
    existing.iter().any(|appointment| {
        appointment.doctor_id == *doctor_id
            && appointment.date_time == candidate
            && appointment.status.holds_slot()
            && excluding.map_or(true, |id| appointment.id != *id)
    })
}
