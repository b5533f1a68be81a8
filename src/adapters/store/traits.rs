//! Storage abstraction traits
//!
//! These traits encode the query contracts the clinic core needs from a
//! document store. The persistence mechanism itself is an adapter concern;
//! the core only relies on the semantics documented here.
//!
//! The one correctness-critical contract is
//! [`AppointmentStore::insert_appointment`]:
//! the double-booking check and the insert MUST be a single atomic unit with
//! respect to concurrent inserts for the same (doctor, dateTime) pair. A
//! check performed as two separate unsynchronized operations is a race and
//! therefore a defective implementation of this trait.

use crate::domain::account::Account;
use crate::domain::appointment::Appointment;
use crate::domain::doctor::Doctor;
use crate::domain::ids::{
    AccountId, AppointmentId, DoctorId, MedicineId, PatientId,
};
use crate::domain::medicine::{Medicine, StockOperation};
use crate::domain::patient::Patient;
use crate::domain::record::MedicalRecord;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Identity-store account collection
///
/// Email uniqueness (case-insensitive) is an index-level invariant: the
/// store enforces it inside `insert`, not the caller.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account
    ///
    /// # Errors
    ///
    /// Returns a `Validation` domain error if the (normalized) email is
    /// already registered.
    async fn insert_account(&self, account: Account) -> Result<Account>;

    /// Fetch an account by id
    async fn get_account(&self, id: &AccountId) -> Result<Option<Account>>;

    /// Fetch an account by normalized email
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Replace an existing account document
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` domain error if the account does not exist.
    async fn update_account(&self, account: Account) -> Result<Account>;

    /// Total number of accounts (used by bootstrap reporting)
    async fn count_accounts(&self) -> Result<usize>;
}

/// Patient directory collection
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Insert a new patient profile
    async fn insert_patient(&self, patient: Patient) -> Result<Patient>;

    /// Fetch a patient by id
    async fn get_patient(&self, id: &PatientId) -> Result<Option<Patient>>;

    /// Replace an existing patient document
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` domain error if the patient does not exist.
    async fn update_patient(&self, patient: Patient) -> Result<Patient>;

    /// All patients, ordered by creation time
    async fn list_patients(&self) -> Result<Vec<Patient>>;
}

/// Doctor directory collection
///
/// Reads populate the derived `patients` and `appointments` back-references
/// from the appointment collection; implementations must not store them as
/// a second mutable copy.
#[async_trait]
pub trait DoctorStore: Send + Sync {
    /// Insert a new doctor profile
    async fn insert_doctor(&self, doctor: Doctor) -> Result<Doctor>;

    /// Fetch a doctor by id, back-references populated
    async fn get_doctor(&self, id: &DoctorId) -> Result<Option<Doctor>>;

    /// Replace an existing doctor document
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` domain error if the doctor does not exist.
    async fn update_doctor(&self, doctor: Doctor) -> Result<Doctor>;

    /// All doctors, back-references populated, ordered by creation time
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;
}

/// Appointment collection
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Insert a new appointment, enforcing the double-booking invariant
    ///
    /// The conflict check (same doctor, identical `dateTime`, status in
    /// {pending, approved}) and the insert are one atomic unit: of two
    /// concurrent inserts for the same slot, exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns a `SchedulingConflict` domain error if the slot is taken.
    async fn insert_appointment(&self, appointment: Appointment) -> Result<Appointment>;

    /// Fetch an appointment by id
    async fn get_appointment(&self, id: &AppointmentId) -> Result<Option<Appointment>>;

    /// Replace an existing appointment document
    ///
    /// Status-only updates go through here; the transition rules are the
    /// lifecycle manager's concern, not the store's.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` domain error if the appointment does not exist.
    async fn update_appointment(&self, appointment: Appointment) -> Result<Appointment>;

    /// All appointments ordered by `dateTime` ascending
    async fn list_appointments(&self) -> Result<Vec<Appointment>>;

    /// Appointments with `dateTime` in `[start, end]` (inclusive), optionally
    /// filtered to one doctor, ordered by `dateTime` ascending
    async fn list_appointments_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        doctor_id: Option<&DoctorId>,
    ) -> Result<Vec<Appointment>>;

    /// All appointments for a doctor ordered by `dateTime` ascending
    async fn list_appointments_for_doctor(&self, doctor_id: &DoctorId)
        -> Result<Vec<Appointment>>;
}

/// Medicine inventory collection
#[async_trait]
pub trait MedicineStore: Send + Sync {
    /// Insert a new medicine
    async fn insert_medicine(&self, medicine: Medicine) -> Result<Medicine>;

    /// Fetch a medicine by id
    async fn get_medicine(&self, id: &MedicineId) -> Result<Option<Medicine>>;

    /// Replace an existing medicine document
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` domain error if the medicine does not exist.
    async fn update_medicine(&self, medicine: Medicine) -> Result<Medicine>;

    /// All medicines ordered by name ascending
    async fn list_medicines(&self) -> Result<Vec<Medicine>>;

    /// Adjust the stock counter in one atomic read-modify-write
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` domain error if the medicine does not exist, or
    /// an `InsufficientQuantity` domain error when a subtract would drive
    /// the quantity below zero (the stored quantity is left unchanged).
    async fn adjust_medicine_quantity(
        &self,
        id: &MedicineId,
        amount: u32,
        operation: StockOperation,
    ) -> Result<Medicine>;

    /// Medicines at or below the threshold, ordered by quantity ascending
    ///
    /// With `None`, each medicine compares against its own `reorderLevel`.
    async fn list_low_stock_medicines(&self, threshold: Option<u32>) -> Result<Vec<Medicine>>;

    /// Medicines with `expiryDate <= as_of`, ordered by expiry ascending
    async fn list_expired_medicines(&self, as_of: DateTime<Utc>) -> Result<Vec<Medicine>>;
}

/// Medical record ledger collection (append-only)
#[async_trait]
pub trait MedicalRecordStore: Send + Sync {
    /// Append a new record; there is no update or delete path
    async fn insert_record(&self, record: MedicalRecord) -> Result<MedicalRecord>;

    /// All records for a patient ordered by visit date descending
    async fn list_records_for_patient(&self, patient_id: &PatientId)
        -> Result<Vec<MedicalRecord>>;
}

/// The full set of collections a deployment wires together
#[derive(Clone)]
pub struct ClinicStores {
    pub accounts: Arc<dyn AccountStore>,
    pub patients: Arc<dyn PatientStore>,
    pub doctors: Arc<dyn DoctorStore>,
    pub appointments: Arc<dyn AppointmentStore>,
    pub medicines: Arc<dyn MedicineStore>,
    pub records: Arc<dyn MedicalRecordStore>,
}
