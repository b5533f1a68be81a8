//! Medical record ledger
//!
//! Append-only visit history. Entries are authored by a doctor against a
//! patient; `visitDate` is stamped here at creation, never supplied by the
//! caller. The read path resolves doctor and medicine references into the
//! display fields the original populated server-side.

use crate::adapters::store::traits::{
    ClinicStores, DoctorStore, MedicalRecordStore, MedicineStore, PatientStore,
};
use crate::domain::errors::DomainError;
use crate::domain::ids::{DoctorId, MedicalRecordId, PatientId};
use crate::domain::record::{
    DoctorDisplay, MedicalRecord, MedicalRecordDraft, MedicalRecordView, MedicineDisplay,
    PrescriptionView,
};
use crate::domain::Result;
use chrono::Utc;
use std::sync::Arc;

/// Medical record ledger
pub struct MedicalRecordService {
    patients: Arc<dyn PatientStore>,
    doctors: Arc<dyn DoctorStore>,
    medicines: Arc<dyn MedicineStore>,
    records: Arc<dyn MedicalRecordStore>,
}

impl MedicalRecordService {
    /// Creates the service over the wired store set
    pub fn new(stores: &ClinicStores) -> Self {
        Self {
            patients: stores.patients.clone(),
            doctors: stores.doctors.clone(),
            medicines: stores.medicines.clone(),
            records: stores.records.clone(),
        }
    }

    /// Append a new record entry
    ///
    /// # Errors
    ///
    /// `NotFound` if the patient, the authoring doctor, or a prescribed
    /// medicine does not exist; `Validation` for a blank diagnosis.
    pub async fn add_entry(
        &self,
        patient_id: &PatientId,
        author_id: &DoctorId,
        draft: MedicalRecordDraft,
    ) -> Result<MedicalRecord> {
        if draft.diagnosis.trim().is_empty() {
            return Err(DomainError::Validation("diagnosis is required".to_string()).into());
        }

        self.patients
            .get_patient(patient_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Patient", patient_id.as_str()))?;

        self.doctors
            .get_doctor(author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Doctor", author_id.as_str()))?;

        for prescription in &draft.prescriptions {
            self.medicines
                .get_medicine(&prescription.medicine_id)
                .await?
                .ok_or_else(|| {
                    DomainError::not_found("Medicine", prescription.medicine_id.as_str())
                })?;
        }

        let now = Utc::now();
        let record = MedicalRecord {
            id: MedicalRecordId::generate(),
            patient_id: patient_id.clone(),
            doctor_id: author_id.clone(),
            visit_date: now,
            diagnosis: draft.diagnosis.trim().to_string(),
            symptoms: draft.symptoms,
            notes: draft.notes,
            prescriptions: draft.prescriptions,
            attachments: draft.attachments,
            follow_up_date: draft.follow_up_date,
            created_at: now,
            updated_at: now,
        };
        let created = self.records.insert_record(record).await?;

        tracing::info!(
            record_id = %created.id,
            patient_id = %patient_id,
            doctor_id = %author_id,
            prescriptions = created.prescriptions.len(),
            "Medical record added"
        );
        Ok(created)
    }

    /// A patient's full history, visit date descending, references resolved
    ///
    /// # Errors
    ///
    /// `NotFound` if the patient does not exist.
    pub async fn history(&self, patient_id: &PatientId) -> Result<Vec<MedicalRecordView>> {
        self.patients
            .get_patient(patient_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Patient", patient_id.as_str()))?;

        let records = self.records.list_records_for_patient(patient_id).await?;

        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let doctor = self
                .doctors
                .get_doctor(&record.doctor_id)
                .await?
                .map(|d| DoctorDisplay {
                    name: d.name,
                    specialization: d.specialization,
                });

            let mut prescriptions = Vec::with_capacity(record.prescriptions.len());
            for prescription in &record.prescriptions {
                let medicine = self
                    .medicines
                    .get_medicine(&prescription.medicine_id)
                    .await?
                    .map(|m| MedicineDisplay {
                        name: m.name,
                        dosage_form: m.dosage_form,
                        strength: m.strength,
                    });
                prescriptions.push(PrescriptionView {
                    prescription: prescription.clone(),
                    medicine,
                });
            }

            views.push(MedicalRecordView {
                record,
                doctor,
                prescriptions,
            });
        }
        Ok(views)
    }
}
