//! Appointment domain model and status state machine
//!
//! An appointment is a single point in time (no duration) binding one doctor
//! and one patient. Status follows a strict transition graph; the original
//! storage layer allowed arbitrary overwrites and relied on the UI to stay
//! inside the intended flow, which this model enforces instead.

use crate::domain::errors::DomainError;
use crate::domain::ids::{AppointmentId, DoctorId, PatientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Appointment status
///
/// Wire spellings (`pending`, `approved`, `cancelled`, `completed`) are part
/// of the external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Initial status of every created appointment
    Pending,
    /// Confirmed by staff
    Approved,
    /// Terminal: called off before taking place
    Cancelled,
    /// Terminal: the visit happened
    Completed,
}

impl AppointmentStatus {
    /// Wire spelling of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Approved => "approved",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    /// Whether no further transition is permitted from this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed
        )
    }

    /// Whether the status counts toward the double-booking invariant
    ///
    /// Only non-terminal bookings hold a slot: a cancelled or completed
    /// appointment frees its (doctor, dateTime) pair.
    pub fn holds_slot(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Pending | AppointmentStatus::Approved
        )
    }

    /// All statuses reachable from this one
    pub fn valid_transitions(&self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Pending => {
                &[AppointmentStatus::Approved, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Approved => {
                &[AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Cancelled | AppointmentStatus::Completed => &[],
        }
    }

    /// Whether `next` is a permitted transition target
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        self.valid_transitions().contains(&next)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "approved" => Ok(AppointmentStatus::Approved),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// Appointment record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Appointment identifier
    #[serde(rename = "_id")]
    pub id: AppointmentId,

    /// The doctor the slot belongs to
    #[serde(rename = "doctor")]
    pub doctor_id: DoctorId,

    /// The patient the appointment is about
    #[serde(rename = "patient")]
    pub patient_id: PatientId,

    /// The booked instant (UTC); exact equality defines a slot
    pub date_time: DateTime<Utc>,

    /// Lifecycle status
    pub status: AppointmentStatus,

    /// Required booking reason
    pub reason: String,

    /// Optional free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Creates a new appointment in the initial `pending` status
    pub fn new(
        doctor_id: DoctorId,
        patient_id: PatientId,
        date_time: DateTime<Utc>,
        reason: String,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AppointmentId::generate(),
            doctor_id,
            patient_id,
            date_time,
            status: AppointmentStatus::Pending,
            reason,
            notes,
            created_at: now,
            updated_at: now,
        }
    }
}
