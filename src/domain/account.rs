//! Account domain model
//!
//! Accounts are the identity-store records behind authentication. Each
//! account carries exactly one role, resolved once at the boundary into the
//! [`Role`] enum rather than branched on as a string at use sites. The
//! credential hash is opaque to the domain; hashing lives behind
//! [`crate::adapters::auth::CredentialHasher`].

use crate::domain::ids::{AccountId, DoctorId, PatientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
///
/// Wire spellings (`admin`, `doctor`, `patient`) are part of the external
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator: manages directories, inventory, and accounts
    Admin,
    /// Clinician: owns an availability window, authors medical records
    Doctor,
    /// Patient-subject: the record-holder appointments are about
    Patient,
}

impl Role {
    /// Wire spelling of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            other => Err(format!("Invalid role: {other}")),
        }
    }
}

/// Typed reference to the role-specific profile document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileRef {
    /// Doctor profile for clinician accounts
    Doctor(DoctorId),
    /// Patient profile for patient accounts
    Patient(PatientId),
}

/// Identity-store account record
///
/// Invariant: email is unique case-insensitively; the store keeps it
/// lowercased. The role is immutable after creation (no mutation path
/// exists).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier
    #[serde(rename = "_id")]
    pub id: AccountId,

    /// Unique email, stored lowercased
    pub email: String,

    /// Opaque credential hash (wire name kept from the original document)
    #[serde(rename = "password")]
    pub credential_hash: String,

    /// Account role, fixed at creation
    pub role: Role,

    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Raw id of the role-specific profile document, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Inactive accounts cannot authenticate
    pub is_active: bool,

    /// Last successful authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Normalizes an email for storage and lookup
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Resolves the raw profile id into a typed reference based on the role
    ///
    /// Admin accounts have no profile; doctor/patient profile ids that fail
    /// validation resolve to `None`.
    pub fn profile_ref(&self) -> Option<ProfileRef> {
        let raw = self.profile.as_deref()?;
        match self.role {
            Role::Doctor => DoctorId::new(raw).ok().map(ProfileRef::Doctor),
            Role::Patient => PatientId::new(raw).ok().map(ProfileRef::Patient),
            Role::Admin => None,
        }
    }
}
