//! Patient and doctor directories
//!
//! Thin CRUD over the two profile collections. The only decisioning beyond
//! existence checks is draft validation, which is also where the
//! availability-window invariant (`startTime < endTime`) is enforced for
//! doctors.

use crate::adapters::store::traits::{AppointmentStore, ClinicStores, DoctorStore, PatientStore};
use crate::domain::doctor::{Doctor, DoctorDraft};
use crate::domain::errors::DomainError;
use crate::domain::ids::{DoctorId, PatientId};
use crate::domain::patient::{Patient, PatientDraft};
use crate::domain::Result;
use chrono::Utc;
use std::sync::Arc;

/// Patient and doctor directory operations
pub struct DirectoryService {
    patients: Arc<dyn PatientStore>,
    doctors: Arc<dyn DoctorStore>,
    appointments: Arc<dyn AppointmentStore>,
}

impl DirectoryService {
    /// Creates the service over the wired store set
    pub fn new(stores: &ClinicStores) -> Self {
        Self {
            patients: stores.patients.clone(),
            doctors: stores.doctors.clone(),
            appointments: stores.appointments.clone(),
        }
    }

    // --- patients ---

    /// Register a new patient profile
    pub async fn create_patient(&self, draft: PatientDraft) -> Result<Patient> {
        draft.validate().map_err(DomainError::Validation)?;

        let now = Utc::now();
        let patient = Patient {
            id: PatientId::generate(),
            name: draft.name,
            age: draft.age,
            gender: draft.gender,
            contact_info: draft.contact_info,
            date_of_birth: draft.date_of_birth,
            medical_history: draft.medical_history,
            created_at: now,
            updated_at: now,
        };
        let created = self.patients.insert_patient(patient).await?;
        tracing::info!(patient_id = %created.id, "Patient registered");
        Ok(created)
    }

    /// Fetch one patient
    ///
    /// # Errors
    ///
    /// `NotFound` if the patient does not exist.
    pub async fn get_patient(&self, id: &PatientId) -> Result<Patient> {
        self.patients
            .get_patient(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Patient", id.as_str()).into())
    }

    /// Replace a patient profile, keeping identity and creation time
    pub async fn update_patient(&self, id: &PatientId, draft: PatientDraft) -> Result<Patient> {
        draft.validate().map_err(DomainError::Validation)?;

        let existing = self.get_patient(id).await?;
        let patient = Patient {
            id: existing.id,
            name: draft.name,
            age: draft.age,
            gender: draft.gender,
            contact_info: draft.contact_info,
            date_of_birth: draft.date_of_birth,
            medical_history: draft.medical_history,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.patients.update_patient(patient).await
    }

    /// All patients
    pub async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.patients.list_patients().await
    }

    // --- doctors ---

    /// Register a new doctor profile
    ///
    /// # Errors
    ///
    /// `Validation` for missing fields or an inverted availability window.
    pub async fn create_doctor(&self, draft: DoctorDraft) -> Result<Doctor> {
        draft.validate().map_err(DomainError::Validation)?;

        let now = Utc::now();
        let doctor = Doctor {
            id: DoctorId::generate(),
            name: draft.name,
            specialization: draft.specialization,
            availability: draft.availability,
            qualifications: draft.qualifications,
            contact_info: draft.contact_info,
            patients: Vec::new(),
            appointments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let created = self.doctors.insert_doctor(doctor).await?;
        tracing::info!(doctor_id = %created.id, "Doctor registered");
        Ok(created)
    }

    /// Fetch one doctor, derived back-references populated
    ///
    /// # Errors
    ///
    /// `NotFound` if the doctor does not exist.
    pub async fn get_doctor(&self, id: &DoctorId) -> Result<Doctor> {
        self.doctors
            .get_doctor(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Doctor", id.as_str()).into())
    }

    /// Replace a doctor profile, keeping identity and creation time
    pub async fn update_doctor(&self, id: &DoctorId, draft: DoctorDraft) -> Result<Doctor> {
        draft.validate().map_err(DomainError::Validation)?;

        let existing = self.get_doctor(id).await?;
        let doctor = Doctor {
            id: existing.id,
            name: draft.name,
            specialization: draft.specialization,
            availability: draft.availability,
            qualifications: draft.qualifications,
            contact_info: draft.contact_info,
            patients: Vec::new(),
            appointments: Vec::new(),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.doctors.update_doctor(doctor).await
    }

    /// All doctors, derived back-references populated
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.doctors.list_doctors().await
    }

    /// The distinct patients a doctor has seen, via the appointment join
    ///
    /// # Errors
    ///
    /// `NotFound` if the doctor does not exist.
    pub async fn list_patients_of(&self, doctor_id: &DoctorId) -> Result<Vec<Patient>> {
        let doctor = self.get_doctor(doctor_id).await?;

        let mut patients = Vec::with_capacity(doctor.patients.len());
        for patient_id in &doctor.patients {
            // The join can momentarily reference a deleted profile; skip it
            // rather than failing the whole listing.
            if let Some(patient) = self.patients.get_patient(patient_id).await? {
                patients.push(patient);
            }
        }
        Ok(patients)
    }

    /// A doctor's appointments, ordered by `dateTime` ascending
    ///
    /// # Errors
    ///
    /// `NotFound` if the doctor does not exist.
    pub async fn list_appointments_of(
        &self,
        doctor_id: &DoctorId,
    ) -> Result<Vec<crate::domain::appointment::Appointment>> {
        self.get_doctor(doctor_id).await?;
        self.appointments
            .list_appointments_for_doctor(doctor_id)
            .await
    }
}
