//! Domain models and types for Meridian.
//!
//! This module contains the core domain models, types, and business rules of
//! the clinic system.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`DoctorId`],
//!   [`AppointmentId`], [`MedicineId`], [`MedicalRecordId`], [`AccountId`])
//! - **Entity models** ([`Patient`], [`Doctor`], [`Appointment`],
//!   [`Medicine`], [`MedicalRecord`], [`Account`])
//! - **Error types** ([`MeridianError`], [`DomainError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so different entity ids cannot be
//! mixed:
//!
//! ```rust
//! use meridian::domain::{DoctorId, PatientId};
//!
//! # fn example() -> Result<(), String> {
//! let doctor_id = DoctorId::new("doc-123")?;
//! let patient_id = PatientId::new("pat-456")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: DoctorId = patient_id;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Wire Compatibility
//!
//! Persisted entity shapes keep the original document field names
//! (camelCase) and enum value spellings; they are part of the external
//! contract and round-trip through `serde_json` unchanged.

pub mod account;
pub mod appointment;
pub mod contact;
pub mod doctor;
pub mod errors;
pub mod ids;
pub mod medicine;
pub mod patient;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use account::{Account, ProfileRef, Role};
pub use appointment::{Appointment, AppointmentStatus};
pub use contact::ContactInfo;
pub use doctor::{Availability, DayOfWeek, Doctor, DoctorDraft};
pub use errors::{DomainError, MeridianError};
pub use ids::{AccountId, AppointmentId, DoctorId, MedicalRecordId, MedicineId, PatientId};
pub use medicine::{DosageForm, Medicine, MedicineDraft, StockOperation};
pub use patient::{Gender, Patient, PatientDraft};
pub use record::{MedicalRecord, MedicalRecordDraft, MedicalRecordView, Prescription};
pub use result::Result;
