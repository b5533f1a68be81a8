//! Embedded document store
//!
//! A single-process document store holding every collection behind one
//! `tokio::sync::RwLock`. The double-booking check in
//! [`AppointmentStore::insert_appointment`] and the stock adjustment in
//! [`MedicineStore::adjust_medicine_quantity`] each run inside one writer
//! section, which is what makes them atomic with respect to concurrent
//! requests.
//!
//! With a data directory configured, each collection is snapshotted to
//! `<dir>/<collection>.json` after every mutation while the writer lock is
//! still held, so the files never get ahead of or behind memory. Durability
//! is best-effort snapshot-on-write; cross-process sharing of a data
//! directory is not supported.

use crate::adapters::store::traits::{
    AccountStore, AppointmentStore, ClinicStores, DoctorStore, MedicalRecordStore, MedicineStore,
    PatientStore,
};
use crate::core::scheduling::conflict::has_conflict;
use crate::domain::account::Account;
use crate::domain::appointment::Appointment;
use crate::domain::doctor::Doctor;
use crate::domain::errors::{DomainError, MeridianError};
use crate::domain::ids::{AccountId, AppointmentId, DoctorId, MedicineId, PatientId};
use crate::domain::medicine::{Medicine, StockOperation};
use crate::domain::patient::Patient;
use crate::domain::record::MedicalRecord;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// All collections, keyed by document id
#[derive(Debug, Default)]
struct ClinicState {
    accounts: BTreeMap<String, Account>,
    patients: BTreeMap<String, Patient>,
    doctors: BTreeMap<String, Doctor>,
    appointments: BTreeMap<String, Appointment>,
    medicines: BTreeMap<String, Medicine>,
    records: BTreeMap<String, MedicalRecord>,
}

/// Embedded document store with optional JSON snapshot persistence
pub struct EmbeddedStore {
    state: RwLock<ClinicState>,
    data_dir: Option<PathBuf>,
}

impl EmbeddedStore {
    /// Creates a purely in-memory store
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(ClinicState::default()),
            data_dir: None,
        }
    }

    /// Opens a store persisted under `dir`, loading any existing snapshots
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or an existing
    /// snapshot fails to parse.
    pub fn persistent(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            MeridianError::Storage(format!(
                "Failed to create data directory {}: {e}",
                dir.display()
            ))
        })?;

        let state = ClinicState {
            accounts: load_collection(&dir, "accounts")?,
            patients: load_collection(&dir, "patients")?,
            doctors: load_collection(&dir, "doctors")?,
            appointments: load_collection(&dir, "appointments")?,
            medicines: load_collection(&dir, "medicines")?,
            records: load_collection(&dir, "records")?,
        };

        tracing::info!(
            data_dir = %dir.display(),
            accounts = state.accounts.len(),
            appointments = state.appointments.len(),
            "Opened persistent document store"
        );

        Ok(Self {
            state: RwLock::new(state),
            data_dir: Some(dir),
        })
    }

    /// Bundles one shared store instance into the trait-object set
    pub fn into_stores(self) -> ClinicStores {
        let store = Arc::new(self);
        ClinicStores {
            accounts: store.clone(),
            patients: store.clone(),
            doctors: store.clone(),
            appointments: store.clone(),
            medicines: store.clone(),
            records: store,
        }
    }

    fn persist<T: Serialize>(&self, name: &str, collection: &BTreeMap<String, T>) -> Result<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        let path = dir.join(format!("{name}.json"));
        let bytes = serde_json::to_vec_pretty(collection)?;
        std::fs::write(&path, bytes).map_err(|e| {
            MeridianError::Storage(format!("Failed to write snapshot {}: {e}", path.display()))
        })
    }

    /// Populates the derived doctor back-references from the appointment
    /// collection: appointment ids ordered by dateTime, plus the distinct
    /// patients in order of first appearance.
    fn populate_doctor(state: &ClinicState, mut doctor: Doctor) -> Doctor {
        let mut appointments: Vec<&Appointment> = state
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor.id)
            .collect();
        appointments.sort_by(|a, b| a.date_time.cmp(&b.date_time).then(a.id.as_str().cmp(b.id.as_str())));

        doctor.appointments = appointments.iter().map(|a| a.id.clone()).collect();
        doctor.patients = Vec::new();
        for appointment in appointments {
            if !doctor.patients.contains(&appointment.patient_id) {
                doctor.patients.push(appointment.patient_id.clone());
            }
        }
        doctor
    }
}

fn load_collection<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<BTreeMap<String, T>> {
    let path = dir.join(format!("{name}.json"));
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let bytes = std::fs::read(&path).map_err(|e| {
        MeridianError::Storage(format!("Failed to read snapshot {}: {e}", path.display()))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        MeridianError::Storage(format!("Corrupt snapshot {}: {e}", path.display()))
    })
}

fn sorted_by_creation<T: Clone>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = items.collect();
    out.sort_by_key(|item| key(item));
    out
}

#[async_trait]
impl AccountStore for EmbeddedStore {
    async fn insert_account(&self, account: Account) -> Result<Account> {
        let mut state = self.state.write().await;
        // Unique-index semantics: email is stored normalized, compared exact.
        if state.accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Validation("Email already registered".to_string()).into());
        }
        state
            .accounts
            .insert(account.id.as_str().to_string(), account.clone());
        self.persist("accounts", &state.accounts)?;
        Ok(account)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Option<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.get(id.as_str()).cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let normalized = Account::normalize_email(email);
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|a| a.email == normalized)
            .cloned())
    }

    async fn update_account(&self, account: Account) -> Result<Account> {
        let mut state = self.state.write().await;
        if !state.accounts.contains_key(account.id.as_str()) {
            return Err(DomainError::not_found("Account", account.id.as_str()).into());
        }
        state
            .accounts
            .insert(account.id.as_str().to_string(), account.clone());
        self.persist("accounts", &state.accounts)?;
        Ok(account)
    }

    async fn count_accounts(&self) -> Result<usize> {
        let state = self.state.read().await;
        Ok(state.accounts.len())
    }
}

#[async_trait]
impl PatientStore for EmbeddedStore {
    async fn insert_patient(&self, patient: Patient) -> Result<Patient> {
        let mut state = self.state.write().await;
        state
            .patients
            .insert(patient.id.as_str().to_string(), patient.clone());
        self.persist("patients", &state.patients)?;
        Ok(patient)
    }

    async fn get_patient(&self, id: &PatientId) -> Result<Option<Patient>> {
        let state = self.state.read().await;
        Ok(state.patients.get(id.as_str()).cloned())
    }

    async fn update_patient(&self, patient: Patient) -> Result<Patient> {
        let mut state = self.state.write().await;
        if !state.patients.contains_key(patient.id.as_str()) {
            return Err(DomainError::not_found("Patient", patient.id.as_str()).into());
        }
        state
            .patients
            .insert(patient.id.as_str().to_string(), patient.clone());
        self.persist("patients", &state.patients)?;
        Ok(patient)
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        let state = self.state.read().await;
        Ok(sorted_by_creation(
            state.patients.values().cloned(),
            |p: &Patient| p.created_at,
        ))
    }
}

#[async_trait]
impl DoctorStore for EmbeddedStore {
    async fn insert_doctor(&self, mut doctor: Doctor) -> Result<Doctor> {
        // Back-references are derived; never store caller-supplied copies.
        doctor.appointments = Vec::new();
        doctor.patients = Vec::new();

        let mut state = self.state.write().await;
        state
            .doctors
            .insert(doctor.id.as_str().to_string(), doctor.clone());
        self.persist("doctors", &state.doctors)?;
        Ok(doctor)
    }

    async fn get_doctor(&self, id: &DoctorId) -> Result<Option<Doctor>> {
        let state = self.state.read().await;
        Ok(state
            .doctors
            .get(id.as_str())
            .cloned()
            .map(|doctor| Self::populate_doctor(&state, doctor)))
    }

    async fn update_doctor(&self, mut doctor: Doctor) -> Result<Doctor> {
        doctor.appointments = Vec::new();
        doctor.patients = Vec::new();

        let mut state = self.state.write().await;
        if !state.doctors.contains_key(doctor.id.as_str()) {
            return Err(DomainError::not_found("Doctor", doctor.id.as_str()).into());
        }
        state
            .doctors
            .insert(doctor.id.as_str().to_string(), doctor.clone());
        self.persist("doctors", &state.doctors)?;
        Ok(Self::populate_doctor(&state, doctor))
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let state = self.state.read().await;
        let doctors = sorted_by_creation(state.doctors.values().cloned(), |d: &Doctor| d.created_at);
        Ok(doctors
            .into_iter()
            .map(|doctor| Self::populate_doctor(&state, doctor))
            .collect())
    }
}

#[async_trait]
impl AppointmentStore for EmbeddedStore {
    async fn insert_appointment(&self, appointment: Appointment) -> Result<Appointment> {
        // Check-then-insert under one writer section: this is the atomicity
        // the double-booking invariant requires.
        let mut state = self.state.write().await;
        let existing: Vec<&Appointment> = state.appointments.values().collect();
        if has_conflict(
            &existing,
            &appointment.doctor_id,
            appointment.date_time,
            None,
        ) {
            return Err(DomainError::SchedulingConflict.into());
        }
        state
            .appointments
            .insert(appointment.id.as_str().to_string(), appointment.clone());
        self.persist("appointments", &state.appointments)?;
        Ok(appointment)
    }

    async fn get_appointment(&self, id: &AppointmentId) -> Result<Option<Appointment>> {
        let state = self.state.read().await;
        Ok(state.appointments.get(id.as_str()).cloned())
    }

    async fn update_appointment(&self, appointment: Appointment) -> Result<Appointment> {
        let mut state = self.state.write().await;
        if !state.appointments.contains_key(appointment.id.as_str()) {
            return Err(DomainError::not_found("Appointment", appointment.id.as_str()).into());
        }
        let existing: Vec<&Appointment> = state.appointments.values().collect();
        if has_conflict(
            &existing,
            &appointment.doctor_id,
            appointment.date_time,
            Some(&appointment.id),
        ) && appointment.status.holds_slot()
        {
            return Err(DomainError::SchedulingConflict.into());
        }
        state
            .appointments
            .insert(appointment.id.as_str().to_string(), appointment.clone());
        self.persist("appointments", &state.appointments)?;
        Ok(appointment)
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let state = self.state.read().await;
        let mut all: Vec<Appointment> = state.appointments.values().cloned().collect();
        all.sort_by(|a, b| a.date_time.cmp(&b.date_time).then(a.id.as_str().cmp(b.id.as_str())));
        Ok(all)
    }

    async fn list_appointments_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        doctor_id: Option<&DoctorId>,
    ) -> Result<Vec<Appointment>> {
        let state = self.state.read().await;
        let mut hits: Vec<Appointment> = state
            .appointments
            .values()
            .filter(|a| a.date_time >= start && a.date_time <= end)
            .filter(|a| doctor_id.map_or(true, |id| &a.doctor_id == id))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.date_time.cmp(&b.date_time).then(a.id.as_str().cmp(b.id.as_str())));
        Ok(hits)
    }

    async fn list_appointments_for_doctor(
        &self,
        doctor_id: &DoctorId,
    ) -> Result<Vec<Appointment>> {
        let state = self.state.read().await;
        let mut hits: Vec<Appointment> = state
            .appointments
            .values()
            .filter(|a| &a.doctor_id == doctor_id)
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.date_time.cmp(&b.date_time).then(a.id.as_str().cmp(b.id.as_str())));
        Ok(hits)
    }
}

#[async_trait]
impl MedicineStore for EmbeddedStore {
    async fn insert_medicine(&self, medicine: Medicine) -> Result<Medicine> {
        let mut state = self.state.write().await;
        state
            .medicines
            .insert(medicine.id.as_str().to_string(), medicine.clone());
        self.persist("medicines", &state.medicines)?;
        Ok(medicine)
    }

    async fn get_medicine(&self, id: &MedicineId) -> Result<Option<Medicine>> {
        let state = self.state.read().await;
        Ok(state.medicines.get(id.as_str()).cloned())
    }

    async fn update_medicine(&self, medicine: Medicine) -> Result<Medicine> {
        let mut state = self.state.write().await;
        if !state.medicines.contains_key(medicine.id.as_str()) {
            return Err(DomainError::not_found("Medicine", medicine.id.as_str()).into());
        }
        state
            .medicines
            .insert(medicine.id.as_str().to_string(), medicine.clone());
        self.persist("medicines", &state.medicines)?;
        Ok(medicine)
    }

    async fn list_medicines(&self) -> Result<Vec<Medicine>> {
        let state = self.state.read().await;
        let mut all: Vec<Medicine> = state.medicines.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn adjust_medicine_quantity(
        &self,
        id: &MedicineId,
        amount: u32,
        operation: StockOperation,
    ) -> Result<Medicine> {
        let mut state = self.state.write().await;
        let medicine = state
            .medicines
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::not_found("Medicine", id.as_str()))?;

        match operation {
            StockOperation::Add => {
                medicine.quantity = medicine.quantity.saturating_add(amount);
            }
            StockOperation::Subtract => {
                if medicine.quantity < amount {
                    return Err(DomainError::InsufficientQuantity {
                        requested: amount,
                        available: medicine.quantity,
                    }
                    .into());
                }
                medicine.quantity -= amount;
            }
        }
        medicine.updated_at = Utc::now();
        let updated = medicine.clone();
        self.persist("medicines", &state.medicines)?;
        Ok(updated)
    }

    async fn list_low_stock_medicines(&self, threshold: Option<u32>) -> Result<Vec<Medicine>> {
        let state = self.state.read().await;
        let mut hits: Vec<Medicine> = state
            .medicines
            .values()
            .filter(|m| match threshold {
                Some(t) => m.quantity <= t,
                None => m.is_low_stock(),
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.quantity.cmp(&b.quantity).then(a.name.cmp(&b.name)));
        Ok(hits)
    }

    async fn list_expired_medicines(&self, as_of: DateTime<Utc>) -> Result<Vec<Medicine>> {
        let state = self.state.read().await;
        let mut hits: Vec<Medicine> = state
            .medicines
            .values()
            .filter(|m| m.is_expired(as_of))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date).then(a.name.cmp(&b.name)));
        Ok(hits)
    }
}

#[async_trait]
impl MedicalRecordStore for EmbeddedStore {
    async fn insert_record(&self, record: MedicalRecord) -> Result<MedicalRecord> {
        let mut state = self.state.write().await;
        state
            .records
            .insert(record.id.as_str().to_string(), record.clone());
        self.persist("records", &state.records)?;
        Ok(record)
    }

    async fn list_records_for_patient(
        &self,
        patient_id: &PatientId,
    ) -> Result<Vec<MedicalRecord>> {
        let state = self.state.read().await;
        let mut hits: Vec<MedicalRecord> = state
            .records
            .values()
            .filter(|r| &r.patient_id == patient_id)
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.visit_date.cmp(&a.visit_date).then(a.id.as_str().cmp(b.id.as_str())));
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::appointment::AppointmentStatus;
    use chrono::{Duration, TimeZone};

    fn appointment_at(doctor: &DoctorId, at: DateTime<Utc>) -> Appointment {
        Appointment::new(
            doctor.clone(),
            PatientId::generate(),
            at,
            "check-up".to_string(),
            None,
        )
    }

    fn medicine(quantity: u32) -> Medicine {
        Medicine {
            id: MedicineId::generate(),
            name: "Amoxil".to_string(),
            generic_name: "amoxicillin".to_string(),
            category: "antibiotic".to_string(),
            manufacturer: "ACME Pharma".to_string(),
            dosage_form: crate::domain::medicine::DosageForm::Capsule,
            strength: "500mg".to_string(),
            quantity,
            unit: "box".to_string(),
            batch_number: "B-1".to_string(),
            expiry_date: Utc::now() + Duration::days(30),
            reorder_level: 10,
            unit_price: 4.20,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_appointment_rejects_taken_slot() {
        let store = EmbeddedStore::in_memory();
        let doctor = DoctorId::generate();
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

        store
            .insert_appointment(appointment_at(&doctor, at))
            .await
            .unwrap();
        let err = store
            .insert_appointment(appointment_at(&doctor, at))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MeridianError::Domain(DomainError::SchedulingConflict)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_one_wins() {
        let store = Arc::new(EmbeddedStore::in_memory());
        let doctor = DoctorId::generate();
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

        let (a, b) = tokio::join!(
            store.insert_appointment(appointment_at(&doctor, at)),
            store.insert_appointment(appointment_at(&doctor, at)),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        assert_eq!(store.list_appointments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_adjust_underflow_leaves_quantity_unchanged() {
        let store = EmbeddedStore::in_memory();
        let m = store.insert_medicine(medicine(3)).await.unwrap();

        let err = store
            .adjust_medicine_quantity(&m.id, 5, StockOperation::Subtract)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MeridianError::Domain(DomainError::InsufficientQuantity {
                requested: 5,
                available: 3
            })
        ));
        assert_eq!(store.get_medicine(&m.id).await.unwrap().unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = EmbeddedStore::in_memory();
        let mut account = Account {
            id: AccountId::generate(),
            email: "admin@clinic.com".to_string(),
            credential_hash: "h".to_string(),
            role: crate::domain::account::Role::Admin,
            username: None,
            profile: None,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_account(account.clone()).await.unwrap();

        account.id = AccountId::generate();
        let err = store.insert_account(account).await.unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::Validation(msg)) if msg == "Email already registered"
        ));
    }

    #[tokio::test]
    async fn test_persistent_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let doctor = DoctorId::generate();
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

        {
            let store = EmbeddedStore::persistent(dir.path()).unwrap();
            store
                .insert_appointment(appointment_at(&doctor, at))
                .await
                .unwrap();
        }

        let reopened = EmbeddedStore::persistent(dir.path()).unwrap();
        let appointments = reopened.list_appointments().await.unwrap();
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].doctor_id, doctor);
        assert_eq!(appointments[0].status, AppointmentStatus::Pending);
    }
}
