//! Document store adapters

pub mod embedded;
pub mod factory;
pub mod traits;

pub use embedded::EmbeddedStore;
pub use factory::create_stores;
pub use traits::{
    AccountStore, AppointmentStore, ClinicStores, DoctorStore, MedicalRecordStore, MedicineStore,
    PatientStore,
};
