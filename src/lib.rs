// Meridian - Clinic Management Core
// Copyright (c) 2025 Meridian Contributors
// Licensed under the MIT License

//! # Meridian - Clinic Management Core
//!
//! Meridian is the business core of a clinic management system: appointment
//! scheduling with double-booking prevention, doctor availability windows,
//! a pharmacy inventory ledger, an append-only medical record ledger, and a
//! role-gated identity store.
//!
//! ## Architecture
//!
//! Meridian follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (scheduling, inventory, records, identity)
//! - [`adapters`] - Document store backends and authentication seams
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! The HTTP transport and UI are out of scope: the [`core`] services are
//! the boundary a transport layer calls after authenticating the request
//! and resolving its role through [`core::identity`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meridian::adapters::store::EmbeddedStore;
//! use meridian::core::scheduling::AppointmentService;
//! use meridian::domain::{DoctorId, PatientId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stores = EmbeddedStore::in_memory().into_stores();
//!     let appointments = AppointmentService::new(&stores);
//!
//!     let booked = appointments
//!         .create(
//!             &DoctorId::new("doc-1")?,
//!             &PatientId::new("pat-1")?,
//!             "2025-06-02T10:00:00Z".parse()?,
//!             "Annual check-up",
//!             None,
//!         )
//!         .await?;
//!
//!     println!("Booked appointment {}", booked.id);
//!     Ok(())
//! }
//! ```
//!
//! ## The Double-Booking Invariant
//!
//! For any (doctor, dateTime) pair, at most one appointment whose status is
//! `pending` or `approved` may exist. The conflict check and the insert are
//! one atomic unit inside
//! [`adapters::store::AppointmentStore::insert_appointment`]; of two
//! concurrent bookings for the same slot, exactly one succeeds and the
//! other fails with a `SchedulingConflict`.
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::MeridianError`]; caller-visible
//! business failures are the [`domain::DomainError`] taxonomy, each with a
//! stable machine-readable kind:
//!
//! ```rust
//! use meridian::domain::DomainError;
//!
//! assert_eq!(DomainError::SchedulingConflict.kind(), "scheduling_conflict");
//! ```
//!
//! ## Logging
//!
//! Meridian uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(appointment_id = "apt-1", "Appointment created");
//! warn!(medicine_id = "med-9", quantity = 2, "Medicine at or below reorder level");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
