//! Business logic
//!
//! The clinic core: scheduling (availability, conflicts, lifecycle), the
//! inventory ledger, the medical record ledger, the profile directories,
//! identity/authorization, and the operator bootstrap.

pub mod bootstrap;
pub mod directory;
pub mod identity;
pub mod inventory;
pub mod records;
pub mod scheduling;

pub use bootstrap::{bootstrap_admin, BootstrapOutcome};
pub use directory::DirectoryService;
pub use identity::IdentityService;
pub use inventory::InventoryService;
pub use records::MedicalRecordService;
pub use scheduling::AppointmentService;
