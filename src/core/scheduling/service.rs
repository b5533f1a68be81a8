//! Appointment lifecycle manager
//!
//! Owns appointment creation and status transitions. Creation validates the
//! request, checks that both parties exist, checks the doctor's availability
//! window, and then hands the conflict check to the store, where it is
//! atomic with the insert. Status updates enforce the strict transition
//! table on [`AppointmentStatus`].

use crate::adapters::store::traits::{AppointmentStore, ClinicStores, DoctorStore, PatientStore};
use crate::core::scheduling::availability::availability_violation;
use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::errors::DomainError;
use crate::domain::ids::{AppointmentId, DoctorId, PatientId};
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Appointment lifecycle manager
pub struct AppointmentService {
    doctors: Arc<dyn DoctorStore>,
    patients: Arc<dyn PatientStore>,
    appointments: Arc<dyn AppointmentStore>,
}

impl AppointmentService {
    /// Creates the service over the wired store set
    pub fn new(stores: &ClinicStores) -> Self {
        Self {
            doctors: stores.doctors.clone(),
            patients: stores.patients.clone(),
            appointments: stores.appointments.clone(),
        }
    }

    /// Book a new appointment
    ///
    /// Validation order: required fields, doctor existence, patient
    /// existence, availability window, then the atomic conflict check at the
    /// store. The created appointment starts `pending`.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank reason, `NotFound` for a missing doctor or
    /// patient, `AvailabilityViolation` outside the window,
    /// `SchedulingConflict` if the slot is taken.
    pub async fn create(
        &self,
        doctor_id: &DoctorId,
        patient_id: &PatientId,
        date_time: DateTime<Utc>,
        reason: &str,
        notes: Option<String>,
    ) -> Result<Appointment> {
        if reason.trim().is_empty() {
            return Err(DomainError::Validation("reason is required".to_string()).into());
        }

        let doctor = self
            .doctors
            .get_doctor(doctor_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Doctor", doctor_id.as_str()))?;

        self.patients
            .get_patient(patient_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Patient", patient_id.as_str()))?;

        if let Some(reason_text) = availability_violation(&doctor.availability, date_time) {
            return Err(DomainError::AvailabilityViolation(reason_text).into());
        }

        let appointment = Appointment::new(
            doctor_id.clone(),
            patient_id.clone(),
            date_time,
            reason.trim().to_string(),
            notes,
        );
        let created = self.appointments.insert_appointment(appointment).await?;

        tracing::info!(
            appointment_id = %created.id,
            doctor_id = %doctor_id,
            patient_id = %patient_id,
            date_time = %date_time,
            "Appointment created"
        );
        Ok(created)
    }

    /// Fetch one appointment
    ///
    /// # Errors
    ///
    /// `NotFound` if the appointment does not exist.
    pub async fn get(&self, id: &AppointmentId) -> Result<Appointment> {
        self.appointments
            .get_appointment(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Appointment", id.as_str()).into())
    }

    /// Apply a status transition
    ///
    /// # Errors
    ///
    /// `NotFound` if the appointment does not exist, `InvalidTransition`
    /// when the strict table forbids the move.
    pub async fn update_status(
        &self,
        id: &AppointmentId,
        new_status: AppointmentStatus,
    ) -> Result<Appointment> {
        let mut appointment = self.get(id).await?;

        if !appointment.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidTransition {
                from: appointment.status,
                to: new_status,
            }
            .into());
        }

        let previous = appointment.status;
        appointment.status = new_status;
        appointment.updated_at = Utc::now();
        let updated = self.appointments.update_appointment(appointment).await?;

        tracing::info!(
            appointment_id = %id,
            from = %previous,
            to = %new_status,
            "Appointment status updated"
        );
        Ok(updated)
    }

    /// Apply a status transition given the raw status string
    ///
    /// # Errors
    ///
    /// `InvalidStatus` if the string is not one of the four recognized
    /// values, then everything `update_status` can return.
    pub async fn update_status_raw(&self, id: &AppointmentId, status: &str) -> Result<Appointment> {
        let new_status: AppointmentStatus = status.parse()?;
        self.update_status(id, new_status).await
    }

    /// All appointments, ordered by `dateTime` ascending
    pub async fn list_all(&self) -> Result<Vec<Appointment>> {
        self.appointments.list_appointments().await
    }

    /// Appointments in `[start, end]` inclusive, optionally for one doctor,
    /// ordered by `dateTime` ascending
    pub async fn list_by_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        doctor_id: Option<&DoctorId>,
    ) -> Result<Vec<Appointment>> {
        self.appointments
            .list_appointments_in_range(start, end, doctor_id)
            .await
    }

    /// A doctor's appointments, ordered by `dateTime` ascending
    pub async fn list_for_doctor(&self, doctor_id: &DoctorId) -> Result<Vec<Appointment>> {
        self.appointments
            .list_appointments_for_doctor(doctor_id)
            .await
    }
}
