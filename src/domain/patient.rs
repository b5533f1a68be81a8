//! Patient domain model
//!
//! The embedded `medicalHistory` block is the lightweight summary carried on
//! the profile (allergies, lab results). The full visit history lives in the
//! medical record ledger, keyed by patient id.

use crate::domain::contact::ContactInfo;
use crate::domain::ids::PatientId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gender tag, original wire spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// One lab result in the summary history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    pub test_name: String,
    pub date: DateTime<Utc>,
    pub result: String,
}

/// Summary medical history embedded in the profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistorySummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,

    #[serde(default)]
    pub allergies: Vec<String>,

    #[serde(default)]
    pub lab_results: Vec<LabResult>,
}

/// Patient profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Patient identifier
    #[serde(rename = "_id")]
    pub id: PatientId,

    /// Display name
    pub name: String,

    /// Age in years, non-negative
    pub age: u32,

    /// Gender tag
    pub gender: Gender,

    /// Contact details
    pub contact_info: ContactInfo,

    /// Date of birth
    pub date_of_birth: DateTime<Utc>,

    /// Embedded summary history, distinct from the record ledger
    #[serde(default)]
    pub medical_history: MedicalHistorySummary,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or replacing a patient profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact_info: ContactInfo,
    pub date_of_birth: DateTime<Utc>,
    #[serde(default)]
    pub medical_history: MedicalHistorySummary,
}

impl PatientDraft {
    /// Validates required fields
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        self.contact_info.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_wire_spellings() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"male\"");
        assert_eq!(serde_json::to_string(&Gender::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn test_patient_wire_field_names() {
        let patient = Patient {
            id: PatientId::generate(),
            name: "Jordan Pruitt".to_string(),
            age: 42,
            gender: Gender::Other,
            contact_info: ContactInfo {
                phone: "+1-555-0102".to_string(),
                email: "jordan@example.com".to_string(),
                address: Some("12 Main St".to_string()),
            },
            date_of_birth: Utc::now(),
            medical_history: MedicalHistorySummary {
                diagnosis: None,
                allergies: vec!["penicillin".to_string()],
                lab_results: vec![],
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&patient).unwrap();
        assert!(json.get("contactInfo").is_some());
        assert!(json.get("dateOfBirth").is_some());
        assert_eq!(json["medicalHistory"]["allergies"][0], "penicillin");
    }

    #[test]
    fn test_draft_requires_name() {
        let draft = PatientDraft {
            name: "  ".to_string(),
            age: 30,
            gender: Gender::Female,
            contact_info: ContactInfo {
                phone: "+1-555-0103".to_string(),
                email: "a@example.com".to_string(),
                address: None,
            },
            date_of_birth: Utc::now(),
            medical_history: MedicalHistorySummary::default(),
        };
        assert!(draft.validate().is_err());
    }
}
