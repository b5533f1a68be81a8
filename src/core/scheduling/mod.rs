//! Appointment scheduling: availability, conflicts, and lifecycle
//!
//! The three pieces of the scheduling core:
//!
//! - [`availability`] — the weekly-window check (wrong weekday or outside
//!   the daily `[startTime, endTime]` window, inclusive on both ends)
//! - [`conflict`] — the pure double-booking decision over exact
//!   (doctor, dateTime) slots
//! - [`service`] — the lifecycle manager orchestrating both plus the strict
//!   status state machine

pub mod availability;
pub mod conflict;
pub mod service;

pub use availability::is_within_availability;
pub use conflict::has_conflict;
pub use service::AppointmentService;
