//! Integration tests for the append-only medical record ledger

use chrono::{Duration, TimeZone, Utc};
use meridian::adapters::store::{ClinicStores, EmbeddedStore};
use meridian::core::directory::DirectoryService;
use meridian::core::inventory::InventoryService;
use meridian::core::records::MedicalRecordService;
use meridian::domain::doctor::{Availability, DayOfWeek, DoctorDraft};
use meridian::domain::errors::{DomainError, MeridianError};
use meridian::domain::medicine::{DosageForm, MedicineDraft};
use meridian::domain::patient::{MedicalHistorySummary, PatientDraft};
use meridian::domain::record::{MedicalRecordDraft, Prescription};
use meridian::domain::{ContactInfo, DoctorId, Gender, MedicineId, PatientId};

fn contact() -> ContactInfo {
    ContactInfo {
        phone: "+1-555-0101".to_string(),
        email: "someone@clinic.example".to_string(),
        address: None,
    }
}

async fn seed(stores: &ClinicStores) -> (DoctorId, PatientId, MedicineId) {
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

    let inventory = InventoryService::new(stores);
    let medicine = inventory
        .create(MedicineDraft {
            name: "Amoxil".to_string(),
            generic_name: "amoxicillin".to_string(),
            category: "antibiotic".to_string(),
            manufacturer: "ACME Pharma".to_string(),
            dosage_form: DosageForm::Capsule,
            strength: "500mg".to_string(),
            quantity: 100,
            unit: "box".to_string(),
            batch_number: "B-2025-001".to_string(),
            expiry_date: Utc::now() + Duration::days(365),
            reorder_level: 10,
            unit_price: 12.50,
        })
        .await
        .unwrap();

    (doctor.id, patient.id, medicine.id)
}

fn entry(diagnosis: &str, prescriptions: Vec<Prescription>) -> MedicalRecordDraft {
    MedicalRecordDraft {
        diagnosis: diagnosis.to_string(),
        symptoms: vec!["fever".to_string(), "cough".to_string()],
        notes: Some("rest and fluids".to_string()),
        prescriptions,
        attachments: vec![],
        follow_up_date: None,
    }
}

#[tokio::test]
async fn add_entry_stamps_visit_date_at_creation() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor, patient, _) = seed(&stores).await;
    let service = MedicalRecordService::new(&stores);

    let before = Utc::now();
    let record = service
        .add_entry(&patient, &doctor, entry("Bronchitis", vec![]))
        .await
        .unwrap();
    let after = Utc::now();

    assert!(record.visit_date >= before && record.visit_date <= after);
    assert_eq!(record.patient_id, patient);
    assert_eq!(record.doctor_id, doctor);
}

#[tokio::test]
async fn add_entry_requires_existing_patient_doctor_and_medicines() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor, patient, _) = seed(&stores).await;
    let service = MedicalRecordService::new(&stores);

    let err = service
        .add_entry(&PatientId::generate(), &doctor, entry("X", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MeridianError::Domain(DomainError::NotFound { entity: "Patient", .. })
    ));

    let err = service
        .add_entry(&patient, &DoctorId::generate(), entry("X", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MeridianError::Domain(DomainError::NotFound { entity: "Doctor", .. })
    ));

    let ghost_prescription = Prescription {
        medicine_id: MedicineId::generate(),
        dosage: "500mg".to_string(),
        frequency: "twice daily".to_string(),
        duration: "7 days".to_string(),
        instructions: None,
    };
    let err = service
        .add_entry(&patient, &doctor, entry("X", vec![ghost_prescription]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MeridianError::Domain(DomainError::NotFound { entity: "Medicine", .. })
    ));
}

#[tokio::test]
async fn blank_diagnosis_is_a_validation_error() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor, patient, _) = seed(&stores).await;
    let service = MedicalRecordService::new(&stores);

    let err = service
        .add_entry(&patient, &doctor, entry("   ", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MeridianError::Domain(DomainError::Validation(msg)) if msg == "diagnosis is required"
    ));
}

#[tokio::test]
async fn history_is_visit_date_descending_with_resolved_references() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor, patient, medicine) = seed(&stores).await;
    let service = MedicalRecordService::new(&stores);

    let prescription = Prescription {
        medicine_id: medicine.clone(),
        dosage: "500mg".to_string(),
        frequency: "twice daily".to_string(),
        duration: "7 days".to_string(),
        instructions: Some("after meals".to_string()),
    };

    let first = service
        .add_entry(&patient, &doctor, entry("Bronchitis", vec![prescription]))
        .await
        .unwrap();
    let second = service
        .add_entry(&patient, &doctor, entry("Follow-up", vec![]))
        .await
        .unwrap();

    let history = service.history(&patient).await.unwrap();
    assert_eq!(history.len(), 2);

    // Newest first.
    assert_eq!(history[0].record.id, second.id);
    assert_eq!(history[1].record.id, first.id);

    // Author resolved for display.
    let author = history[0].doctor.as_ref().unwrap();
    assert_eq!(author.name, "Dr. Miranda Bailey");
    assert_eq!(author.specialization, "General Surgery");

    // Prescription medicine resolved for display.
    let line = &history[1].prescriptions[0];
    let resolved = line.medicine.as_ref().unwrap();
    assert_eq!(resolved.name, "Amoxil");
    assert_eq!(resolved.strength, "500mg");
    assert_eq!(resolved.dosage_form, DosageForm::Capsule);
}

#[tokio::test]
async fn history_for_missing_patient_is_not_found() {
    let stores = EmbeddedStore::in_memory().into_stores();
    seed(&stores).await;
    let service = MedicalRecordService::new(&stores);

    let err = service.history(&PatientId::generate()).await.unwrap_err();
    assert!(matches!(
        err,
        MeridianError::Domain(DomainError::NotFound { entity: "Patient", .. })
    ));
}

#[tokio::test]
async fn records_of_other_patients_stay_out_of_the_history() {
    let stores = EmbeddedStore::in_memory().into_stores();
    let (doctor, patient_a, _) = seed(&stores).await;
    let directory = DirectoryService::new(&stores);
    let patient_b = directory
        .create_patient(PatientDraft {
            name: "Sam Rivers".to_string(),
            age: 29,
            gender: Gender::Male,
            contact_info: contact(),
            date_of_birth: Utc.with_ymd_and_hms(1996, 7, 1, 0, 0, 0).unwrap(),
            medical_history: MedicalHistorySummary::default(),
        })
        .await
        .unwrap()
        .id;

    let service = MedicalRecordService::new(&stores);
    service
        .add_entry(&patient_a, &doctor, entry("A's visit", vec![]))
        .await
        .unwrap();
    service
        .add_entry(&patient_b, &doctor, entry("B's visit", vec![]))
        .await
        .unwrap();

    let history = service.history(&patient_b).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].record.diagnosis, "B's visit");
}
