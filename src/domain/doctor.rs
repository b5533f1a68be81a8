//! Doctor domain model and weekly availability window
//!
//! A doctor's availability is a recurring weekly schedule: a set of active
//! weekdays plus one daily `[startTime, endTime]` window at `HH:MM:SS`
//! granularity. Both appointment timestamps and the window are interpreted
//! in UTC; no local-time normalization is performed anywhere.

use crate::domain::contact::ContactInfo;
use crate::domain::ids::{AppointmentId, DoctorId, PatientId};
use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week
///
/// Serialized with the full English names (`"Monday"` ... `"Sunday"`),
/// which are part of the stored-document contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Full-name wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Weekly recurring availability window
///
/// `start_time` and `end_time` serialize as `HH:MM:SS` wall-clock strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Weekdays on which the doctor accepts appointments
    pub days: Vec<DayOfWeek>,

    /// Daily window start, inclusive
    pub start_time: NaiveTime,

    /// Daily window end, inclusive
    pub end_time: NaiveTime,
}

impl Availability {
    /// Validates the window shape
    ///
    /// The original system assumed `startTime < endTime` without enforcing
    /// it; here the invariant is checked whenever a doctor is created or
    /// updated, so the scheduling path can rely on a well-formed window.
    pub fn validate(&self) -> Result<(), String> {
        if self.start_time >= self.end_time {
            return Err(format!(
                "availability.startTime ({}) must be before availability.endTime ({})",
                self.start_time, self.end_time
            ));
        }
        Ok(())
    }

    /// Whether the given UTC instant falls on an active weekday
    pub fn contains_day(&self, at: DateTime<Utc>) -> bool {
        self.days.contains(&DayOfWeek::from(at.weekday()))
    }
}

/// Doctor profile
///
/// `patients` and `appointments` are back-references derived from the
/// appointment collection at read time; they are never stored as a second
/// mutable copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Doctor identifier
    #[serde(rename = "_id")]
    pub id: DoctorId,

    /// Display name
    pub name: String,

    /// Medical specialization
    pub specialization: String,

    /// Weekly availability window
    pub availability: Availability,

    /// Qualifications, free-form
    #[serde(default)]
    pub qualifications: Vec<String>,

    /// Contact details
    pub contact_info: ContactInfo,

    /// Patients seen by this doctor (derived at read time)
    #[serde(default)]
    pub patients: Vec<PatientId>,

    /// Appointments booked with this doctor (derived at read time)
    #[serde(default)]
    pub appointments: Vec<AppointmentId>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or replacing a doctor profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDraft {
    pub name: String,
    pub specialization: String,
    pub availability: Availability,
    #[serde(default)]
    pub qualifications: Vec<String>,
    pub contact_info: ContactInfo,
}

impl DoctorDraft {
    /// Validates required fields and the availability window
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if self.specialization.trim().is_empty() {
            return Err("specialization is required".to_string());
        }
        self.contact_info.validate()?;
        self.availability.validate()
    }
}
