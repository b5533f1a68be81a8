//! Secure credential handling using the secrecy crate
//!
//! Sensitive configuration values (the bootstrap admin password) are held in
//! `Secret<...>` containers: memory is zeroed on drop, Debug output is
//! redacted, and access requires an explicit `expose_secret()` call.
//!
//! # Example
//!
//! ```rust
//! use meridian::config::{SecretString, SecretValue};
//! use secrecy::{ExposeSecret, Secret};
//!
//! let password: SecretString = Secret::new(SecretValue::from("hunter2".to_string()));
//! assert_eq!(password.expose_secret().as_ref(), "hunter2");
//! println!("{:?}", password); // Prints: Secret([REDACTED])
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the secret value in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
///
/// Zeros memory on drop, redacts Debug output, and requires explicit
/// `expose_secret()` access.
pub type SecretString = Secret<SecretValue>;
