//! Domain identifier types with validation
//!
//! Newtype wrappers for the document identifiers used across the clinic
//! model. Each type prevents mixing identifiers of different entities and
//! validates that the underlying string is non-empty. Fresh identifiers are
//! UUID v4, matching what the document store assigns on insert.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $label:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from a string
            ///
            /// # Errors
            ///
            /// Returns an error if the string is empty or whitespace-only
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(format!("{} ID cannot be empty", $label));
                }
                Ok(Self(id))
            }

            /// Generates a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

entity_id!(
    /// Identifier of an account in the identity store
    AccountId,
    "Account"
);

entity_id!(
    /// Identifier of a patient profile
    ///
    /// # Examples
    ///
    /// ```
    /// use meridian::domain::ids::PatientId;
    /// use std::str::FromStr;
    ///
    /// let id = PatientId::from_str("64b1f0c2a9d3e45f7c8b1a20").unwrap();
    /// assert_eq!(id.as_str(), "64b1f0c2a9d3e45f7c8b1a20");
    /// ```
    PatientId,
    "Patient"
);

entity_id!(
    /// Identifier of a doctor profile
    DoctorId,
    "Doctor"
);

entity_id!(
    /// Identifier of an appointment
    AppointmentId,
    "Appointment"
);

entity_id!(
    /// Identifier of a medicine in the inventory
    MedicineId,
    "Medicine"
);

entity_id!(
    /// Identifier of a medical record entry
    MedicalRecordId,
    "Medical record"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = PatientId::new("64b1f0c2a9d3e45f7c8b1a20").unwrap();
        assert_eq!(id.as_str(), "64b1f0c2a9d3e45f7c8b1a20");
    }

    #[test]
    fn test_empty_id_fails() {
        assert!(DoctorId::new("").is_err());
        assert!(DoctorId::new("   ").is_err());
        assert!(AppointmentId::new("").is_err());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = AppointmentId::generate();
        let b = AppointmentId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_display_and_from_str() {
        let id: MedicineId = "med-1".parse().unwrap();
        assert_eq!(format!("{}", id), "med-1");
    }

    #[test]
    fn test_serialization_round_trip() {
        let id = AccountId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_error_message_names_the_entity() {
        let err = MedicalRecordId::new(" ").unwrap_err();
        assert_eq!(err, "Medical record ID cannot be empty");
    }
}
