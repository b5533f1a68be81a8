//! Domain error types
//!
//! This module defines the error hierarchy for Meridian. Domain errors carry
//! a stable machine-readable kind so the request boundary can map them to
//! caller-visible failures without string matching; storage and I/O failures
//! stay in the application-level error and never leak internal detail into
//! domain messages.

use crate::domain::appointment::AppointmentStatus;
use thiserror::Error;

/// Main Meridian error type
///
/// This is the primary error type used throughout the application.
/// It wraps the domain taxonomy and provides context for error handling.
#[derive(Debug, Error)]
pub enum MeridianError {
    /// Business-rule failures visible to callers
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage backend errors (logged, not exposed in detail)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl MeridianError {
    /// Returns the domain error if this is a domain-level failure
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            MeridianError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Caller-visible failure taxonomy
///
/// Every variant maps to a stable machine-readable kind plus a human-readable
/// message. None of these conditions are fatal to the process.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    /// A referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Timestamp outside the doctor's availability window
    #[error("Doctor is not available: {0}")]
    AvailabilityViolation(String),

    /// Double-booking: the slot already holds a non-terminal appointment
    #[error("This time slot is already booked")]
    SchedulingConflict,

    /// Stock underflow on subtract
    #[error("Insufficient quantity: requested {requested}, available {available}")]
    InsufficientQuantity { requested: u32, available: u32 },

    /// Status string is not one of the recognized values
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Disallowed status transition
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// Missing or malformed required field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown email, wrong password, inactive account, or bad token
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authenticated but not permitted for this operation
    #[error("Not authorized to access this resource")]
    Forbidden,
}

impl DomainError {
    /// Stable machine-readable kind for the request boundary
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "not_found",
            DomainError::AvailabilityViolation(_) => "availability_violation",
            DomainError::SchedulingConflict => "scheduling_conflict",
            DomainError::InsufficientQuantity { .. } => "insufficient_quantity",
            DomainError::InvalidStatus(_) => "invalid_status",
            DomainError::InvalidTransition { .. } => "invalid_transition",
            DomainError::Validation(_) => "validation_error",
            DomainError::InvalidCredentials => "invalid_credentials",
            DomainError::Forbidden => "forbidden",
        }
    }

    /// Shorthand for a not-found failure
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for MeridianError {
    fn from(err: std::io::Error) -> Self {
        MeridianError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MeridianError {
    fn from(err: serde_json::Error) -> Self {
        MeridianError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MeridianError {
    fn from(err: toml::de::Error) -> Self {
        MeridianError::Configuration(format!("TOML parse error: {err}"))
    }
}
