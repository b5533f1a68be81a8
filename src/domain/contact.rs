//! Shared contact information shape

use serde::{Deserialize, Serialize};

/// Contact details embedded in doctor and patient profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Phone number
    pub phone: String,

    /// Contact email (distinct from any account email)
    pub email: String,

    /// Postal address; optional for doctors, expected for patients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ContactInfo {
    /// Validates that the required fields are present
    pub fn validate(&self) -> Result<(), String> {
        if self.phone.trim().is_empty() {
            return Err("contactInfo.phone is required".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("contactInfo.email is required".to_string());
        }
        Ok(())
    }
}
