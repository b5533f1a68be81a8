//! Integration tests for the availability-window check in the booking path

use chrono::{DateTime, TimeZone, Utc};
use meridian::adapters::store::{ClinicStores, EmbeddedStore};
use meridian::core::directory::DirectoryService;
use meridian::core::scheduling::AppointmentService;
use meridian::domain::doctor::{Availability, DayOfWeek, DoctorDraft};
use meridian::domain::errors::{DomainError, MeridianError};
use meridian::domain::patient::{MedicalHistorySummary, PatientDraft};
use meridian::domain::{ContactInfo, DoctorId, Gender, PatientId};

fn stores() -> ClinicStores {
    EmbeddedStore::in_memory().into_stores()
}

fn contact() -> ContactInfo {
    ContactInfo {
        phone: "+1-555-0101".to_string(),
        email: "someone@clinic.example".to_string(),
        address: Some("12 Main St".to_string()),
    }
}

async fn seed_doctor(stores: &ClinicStores, days: Vec<DayOfWeek>, start: &str, end: &str) -> DoctorId {
    let directory = DirectoryService::new(stores);
    directory
        .create_doctor(DoctorDraft {
            name: "Dr. Meredith Grey".to_string(),
            specialization: "General Surgery".to_string(),
            availability: Availability {
                days,
                start_time: start.parse().unwrap(),
                end_time: end.parse().unwrap(),
            },
            qualifications: vec!["MD".to_string()],
            contact_info: contact(),
        })
        .await
        .unwrap()
        .id
}

async fn seed_patient(stores: &ClinicStores) -> PatientId {
    let directory = DirectoryService::new(stores);
    directory
        .create_patient(PatientDraft {
            name: "Jordan Pruitt".to_string(),
            age: 42,
            gender: Gender::Other,
            contact_info: contact(),
            date_of_birth: Utc.with_ymd_and_hms(1983, 3, 14, 0, 0, 0).unwrap(),
            medical_history: MedicalHistorySummary::default(),
        })
        .await
        .unwrap()
        .id
}

/// 2025-06-02 is a Monday
fn monday_at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, h, m, s).unwrap()
}

async fn try_book(
    service: &AppointmentService,
    doctor: &DoctorId,
    patient: &PatientId,
    at: DateTime<Utc>,
) -> Result<(), MeridianError> {
    service
        .create(doctor, patient, at, "check-up", None)
        .await
        .map(|_| ())
}

fn assert_availability_violation(result: Result<(), MeridianError>, expected_reason: &str) {
    match result {
        Err(MeridianError::Domain(DomainError::AvailabilityViolation(reason))) => {
            assert_eq!(reason, expected_reason)
        }
        other => panic!("expected availability violation, got {other:?}"),
    }
}

#[tokio::test]
async fn booking_on_inactive_weekday_is_rejected() {
    let stores = stores();
    let doctor = seed_doctor(&stores, vec![DayOfWeek::Monday], "09:00:00", "17:00:00").await;
    let patient = seed_patient(&stores).await;
    let service = AppointmentService::new(&stores);

    // 2025-06-03 is a Tuesday, inside the daily window.
    let tuesday = Utc.with_ymd_and_hms(2025, 6, 3, 10, 0, 0).unwrap();
    assert_availability_violation(
        try_book(&service, &doctor, &patient, tuesday).await,
        "Doctor is not available on this day",
    );
}

#[tokio::test]
async fn window_boundaries_are_inclusive_on_both_ends() {
    let stores = stores();
    let doctor = seed_doctor(&stores, vec![DayOfWeek::Monday], "09:00:00", "17:00:00").await;
    let patient = seed_patient(&stores).await;
    let service = AppointmentService::new(&stores);

    // One second before opening fails.
    assert_availability_violation(
        try_book(&service, &doctor, &patient, monday_at(8, 59, 59)).await,
        "Appointment time is outside doctor's working hours",
    );

    // Exactly at opening and exactly at closing both succeed.
    try_book(&service, &doctor, &patient, monday_at(9, 0, 0))
        .await
        .expect("opening boundary should be bookable");
    try_book(&service, &doctor, &patient, monday_at(17, 0, 0))
        .await
        .expect("closing boundary should be bookable");

    // One second after closing fails.
    assert_availability_violation(
        try_book(&service, &doctor, &patient, monday_at(17, 0, 1)).await,
        "Appointment time is outside doctor's working hours",
    );
}

#[tokio::test]
async fn rejected_bookings_leave_no_appointment_behind() {
    let stores = stores();
    let doctor = seed_doctor(&stores, vec![DayOfWeek::Monday], "09:00:00", "17:00:00").await;
    let patient = seed_patient(&stores).await;
    let service = AppointmentService::new(&stores);

    let _ = try_book(&service, &doctor, &patient, monday_at(7, 0, 0)).await;
    assert!(service.list_all().await.unwrap().is_empty());

    // The doctor's derived appointment list stays empty too.
    let directory = DirectoryService::new(&stores);
    let fetched = directory.get_doctor(&doctor).await.unwrap();
    assert!(fetched.appointments.is_empty());
}

#[tokio::test]
async fn multi_day_window_accepts_every_active_day() {
    let stores = stores();
    let doctor = seed_doctor(
        &stores,
        vec![DayOfWeek::Monday, DayOfWeek::Wednesday],
        "08:30:00",
        "12:00:00",
    )
    .await;
    let patient = seed_patient(&stores).await;
    let service = AppointmentService::new(&stores);

    // 2025-06-04 is a Wednesday.
    let wednesday = Utc.with_ymd_and_hms(2025, 6, 4, 8, 30, 0).unwrap();
    try_book(&service, &doctor, &patient, wednesday)
        .await
        .expect("Wednesday is an active day");

    // 2025-06-05 is a Thursday.
    let thursday = Utc.with_ymd_and_hms(2025, 6, 5, 9, 0, 0).unwrap();
    assert_availability_violation(
        try_book(&service, &doctor, &patient, thursday).await,
        "Doctor is not available on this day",
    );
}
