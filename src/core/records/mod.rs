//! Append-only medical record ledger

pub mod service;

pub use service::MedicalRecordService;
