//! Integration tests for the double-booking invariant
//!
//! For any (doctor, dateTime) pair, at most one appointment in
//! {pending, approved} may exist, regardless of call order or concurrency.

use chrono::{DateTime, TimeZone, Utc};
use meridian::adapters::store::{ClinicStores, EmbeddedStore};
use meridian::core::directory::DirectoryService;
use meridian::core::scheduling::AppointmentService;
use meridian::domain::appointment::AppointmentStatus;
use meridian::domain::doctor::{Availability, DayOfWeek, DoctorDraft};
use meridian::domain::errors::{DomainError, MeridianError};
use meridian::domain::patient::{MedicalHistorySummary, PatientDraft};
use meridian::domain::{ContactInfo, DoctorId, Gender, PatientId};
use std::sync::Arc;

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

/// 2025-06-02 is a Monday, inside the seeded window
fn slot() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
}

fn is_conflict(err: &MeridianError) -> bool {
    matches!(
        err,
        MeridianError::Domain(DomainError::SchedulingConflict)
    )
}

#[tokio::test]
async fn second_booking_for_same_slot_fails() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor, patient) = seed(&stores).await;
    let service = AppointmentService::new(&stores);

    service
        .create(&doctor, &patient, slot(), "first", None)
        .await
        .unwrap();
    let err = service
        .create(&doctor, &patient, slot(), "second", None)
        .await
        .unwrap_err();
    assert!(is_conflict(&err));

    let all = service.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].reason, "first");
}

#[tokio::test]
async fn concurrent_bookings_yield_exactly_one_success() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor, patient) = seed(&stores).await;
    let service = Arc::new(AppointmentService::new(&stores));

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        let doctor = doctor.clone();
        let patient = patient.clone();
        handles.push(tokio::spawn(async move {
            service
                .create(&doctor, &patient, slot(), &format!("attempt {i}"), None)
                .await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) if is_conflict(&err) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(service.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn cancelling_frees_the_slot() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor, patient) = seed(&stores).await;
    let service = AppointmentService::new(&stores);

    let first = service
        .create(&doctor, &patient, slot(), "first", None)
        .await
        .unwrap();
    service
        .update_status(&first.id, AppointmentStatus::Cancelled)
        .await
        .unwrap();

    // The terminal appointment no longer holds the slot.
    service
        .create(&doctor, &patient, slot(), "rebooked", None)
        .await
        .expect("cancelled appointment must free its slot");
}

#[tokio::test]
async fn same_instant_different_doctor_is_not_a_conflict() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor_a, patient) = seed(&stores).await;

    let directory = DirectoryService::new(&stores);
    let doctor_b = directory
        .create_doctor(DoctorDraft {
            name: "Dr. Derek Shepherd".to_string(),
            specialization: "Neurosurgery".to_string(),
            availability: Availability {
                days: vec![DayOfWeek::Monday],
                start_time: "09:00:00".parse().unwrap(),
                end_time: "17:00:00".parse().unwrap(),
            },
            qualifications: vec![],
            contact_info: contact(),
        })
        .await
        .unwrap()
        .id;

    let service = AppointmentService::new(&stores);
    service
        .create(&doctor_a, &patient, slot(), "with A", None)
        .await
        .unwrap();
    service
        .create(&doctor_b, &patient, slot(), "with B", None)
        .await
        .expect("different doctors never conflict");
}

#[tokio::test]
async fn back_reference_gains_exactly_one_entry_per_successful_booking() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor, patient) = seed(&stores).await;
    let service = AppointmentService::new(&stores);
    let directory = DirectoryService::new(&stores);

    // A failed attempt (conflict) followed by a successful retry on a free
    // slot must leave exactly the successful bookings in the list.
    let booked = service
        .create(&doctor, &patient, slot(), "first", None)
        .await
        .unwrap();
    let _ = service
        .create(&doctor, &patient, slot(), "conflicting retry", None)
        .await
        .unwrap_err();

    let later = Utc.with_ymd_and_hms(2025, 6, 2, 11, 0, 0).unwrap();
    let rebooked = service
        .create(&doctor, &patient, later, "second", None)
        .await
        .unwrap();

    let fetched = directory.get_doctor(&doctor).await.unwrap();
    assert_eq!(fetched.appointments, vec![booked.id, rebooked.id]);
    assert_eq!(fetched.patients, vec![patient]);
}
