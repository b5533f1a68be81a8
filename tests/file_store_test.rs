//! Integration tests for the file-backed document store
//!
//! The file backend must honor the same contracts as the in-memory one and
//! additionally survive a close/reopen cycle with the wire-compatible
//! document shapes on disk.

use chrono::{TimeZone, Utc};
use meridian::adapters::store::{ClinicStores, EmbeddedStore};
use meridian::core::directory::DirectoryService;
use meridian::core::scheduling::AppointmentService;
use meridian::domain::appointment::AppointmentStatus;
use meridian::domain::doctor::{Availability, DayOfWeek, DoctorDraft};
use meridian::domain::errors::{DomainError, MeridianError};
use meridian::domain::patient::{MedicalHistorySummary, PatientDraft};
use meridian::domain::{ContactInfo, DoctorId, Gender, PatientId};
use std::path::Path;

fn contact() -> ContactInfo {
    ContactInfo {
        phone: "+1-555-0101".to_string(),
        email: "someone@clinic.example".to_string(),
        address: None,
    }
}

async fn seed(stores: &ClinicStores) -> (DoctorId, PatientId) {
    let directory = DirectoryService::new(stores);
    let doctor = directory
        .create_doctor(DoctorDraft {
            name: "Dr. Miranda Bailey".to_string(),
            specialization: "General Surgery".to_string(),
            availability: Availability {
                days: vec![DayOfWeek::Monday],
                start_time: "09:00:00".parse().unwrap(),
                end_time: "17:00:00".parse().unwrap(),
            },
            qualifications: vec![],
            contact_info: contact(),
        })
        .await
        .unwrap();
    let patient = directory
        .create_patient(PatientDraft {
            name: "Jordan Pruitt".to_string(),
            age: 42,
            gender: Gender::Other,
            contact_info: contact(),
            date_of_birth: Utc.with_ymd_and_hms(1983, 3, 14, 0, 0, 0).unwrap(),
            medical_history: MedicalHistorySummary::default(),
        })
        .await
        .unwrap();
    (doctor.id, patient.id)
}

fn open(dir: &Path) -> ClinicStores {
    EmbeddedStore::persistent(dir).unwrap().into_stores()
}

#[tokio::test]
async fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let slot = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

    let (doctor, patient) = {
        let stores = open(dir.path());
        let (doctor, patient) = seed(&stores).await;
        let service = AppointmentService::new(&stores);
        let appointment = service
            .create(&doctor, &patient, slot, "check-up", None)
            .await
            .unwrap();
        service
            .update_status(&appointment.id, AppointmentStatus::Approved)
            .await
            .unwrap();
        (doctor, patient)
    };

    let stores = open(dir.path());
    let service = AppointmentService::new(&stores);

    let all = service.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].doctor_id, doctor);
    assert_eq!(all[0].patient_id, patient);
    assert_eq!(all[0].status, AppointmentStatus::Approved);

    // The double-booking invariant still holds against the reloaded state.
    let err = service
        .create(&doctor, &patient, slot, "again", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MeridianError::Domain(DomainError::SchedulingConflict)
    ));
}

#[tokio::test]
async fn snapshots_use_the_wire_document_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let slot = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

    let stores = open(dir.path());
    let (doctor, patient) = seed(&stores).await;
    AppointmentService::new(&stores)
        .create(&doctor, &patient, slot, "check-up", None)
        .await
        .unwrap();

    let raw = std::fs::read_to_string(dir.path().join("appointments.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let (_, appointment) = parsed.as_object().unwrap().iter().next().unwrap();

    // Original document contract: camelCase names, lowercase status.
    assert_eq!(appointment["doctor"], doctor.as_str());
    assert_eq!(appointment["patient"], patient.as_str());
    assert_eq!(appointment["status"], "pending");
    assert!(appointment.get("dateTime").is_some());
    assert!(appointment.get("reason").is_some());

    let raw = std::fs::read_to_string(dir.path().join("doctors.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let (_, stored_doctor) = parsed.as_object().unwrap().iter().next().unwrap();
    assert_eq!(stored_doctor["availability"]["startTime"], "09:00:00");
    assert_eq!(stored_doctor["availability"]["days"][0], "Monday");
    // Back-references are derived at read time, never persisted.
    assert_eq!(stored_doctor["appointments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn derived_back_references_recover_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let slot = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

    let (doctor, appointment_id) = {
        let stores = open(dir.path());
        let (doctor, patient) = seed(&stores).await;
        let appointment = AppointmentService::new(&stores)
            .create(&doctor, &patient, slot, "check-up", None)
            .await
            .unwrap();
        (doctor, appointment.id)
    };

    let stores = open(dir.path());
    let fetched = DirectoryService::new(&stores)
        .get_doctor(&doctor)
        .await
        .unwrap();
    assert_eq!(fetched.appointments, vec![appointment_id]);
    assert_eq!(fetched.patients.len(), 1);
}
