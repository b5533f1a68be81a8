//! Medical record ledger entries
//!
//! Records are append-only: created by a doctor against a patient, never
//! updated or deleted. Each record owns its prescription line items and
//! holds non-owning references to inventory medicines.

use crate::domain::ids::{DoctorId, MedicalRecordId, MedicineId, PatientId};
use crate::domain::medicine::DosageForm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One prescription line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    /// Referenced inventory medicine
    #[serde(rename = "medicine")]
    pub medicine_id: MedicineId,

    /// Dosage, e.g. "500mg"
    pub dosage: String,

    /// Frequency, e.g. "twice daily"
    pub frequency: String,

    /// Duration, e.g. "7 days"
    pub duration: String,

    /// Optional intake instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// File attachment metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Medical record entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    /// Record identifier
    #[serde(rename = "_id")]
    pub id: MedicalRecordId,

    /// The patient the record is about
    #[serde(rename = "patient")]
    pub patient_id: PatientId,

    /// The authoring doctor
    #[serde(rename = "doctor")]
    pub doctor_id: DoctorId,

    /// Visit instant, stamped at creation time
    pub visit_date: DateTime<Utc>,

    /// Diagnosis text, required
    pub diagnosis: String,

    /// Observed symptoms
    #[serde(default)]
    pub symptoms: Vec<String>,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Prescription line items
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,

    /// Attachments
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Optional scheduled follow-up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp (records are append-only, so this
    /// equals `created_at` in practice)
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new record entry
///
/// `visit_date` is intentionally absent: the ledger stamps it at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordDraft {
    pub diagnosis: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<DateTime<Utc>>,
}

/// Doctor reference resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorDisplay {
    pub name: String,
    pub specialization: String,
}

/// Medicine reference resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDisplay {
    pub name: String,
    pub dosage_form: DosageForm,
    pub strength: String,
}

/// One prescription with its medicine reference resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionView {
    /// The stored line item (the raw medicine id lives here)
    pub prescription: Prescription,
    /// Resolved display fields; `None` if the medicine was since removed
    pub medicine: Option<MedicineDisplay>,
}

/// A record with doctor and medicine references resolved for display
///
/// The raw record keeps its wire shape under `record`; `doctor` and
/// `prescriptions` carry the resolved references a rendering layer needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecordView {
    pub record: MedicalRecord,
    /// Resolved author; `None` if the doctor was since removed
    pub doctor: Option<DoctorDisplay>,
    pub prescriptions: Vec<PrescriptionView>,
}
