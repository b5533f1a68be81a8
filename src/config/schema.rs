//! Configuration schema types
//!
//! This module defines the configuration structure for Meridian, loaded from
//! a TOML file with environment overrides.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process, process-lifetime store (tests, demos)
    Memory,
    /// JSON-file-per-collection document store
    File,
}

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Meridian configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeridianConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Authentication/session settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Bootstrap (operator admin seeding) settings
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MeridianConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.auth.validate()?;
        self.bootstrap.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend selection (memory or file)
    pub backend: StorageBackend,

    /// Data directory, required for the file backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == StorageBackend::File {
            match &self.data_dir {
                Some(dir) if !dir.trim().is_empty() => {}
                _ => {
                    return Err(
                        "storage.data_dir is required when storage.backend = 'file'".to_string()
                    )
                }
            }
        }
        Ok(())
    }
}

/// Authentication and session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer session token lifetime in hours
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,

    /// Minimum accepted password length at registration
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            min_password_length: default_min_password_length(),
        }
    }
}

impl AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.session_ttl_hours == 0 {
            return Err("auth.session_ttl_hours must be greater than zero".to_string());
        }
        if self.min_password_length < 8 {
            return Err("auth.min_password_length must be at least 8".to_string());
        }
        Ok(())
    }
}

/// Bootstrap settings for the operator admin-seeding command
#[derive(Debug, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Admin account email
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Admin display name
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Admin password; supply via `${MERIDIAN_BOOTSTRAP_PASSWORD}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<SecretString>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_username: default_admin_username(),
            admin_password: None,
        }
    }
}

impl BootstrapConfig {
    fn validate(&self) -> Result<(), String> {
        if self.admin_email.trim().is_empty() || !self.admin_email.contains('@') {
            return Err(format!(
                "bootstrap.admin_email '{}' is not a valid email",
                self.admin_email
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Log file directory
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid = ["daily", "hourly"];
        if !valid.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_session_ttl_hours() -> u32 {
    168 // 7 days, matching the original token lifetime
}

fn default_min_password_length() -> usize {
    8
}

fn default_admin_email() -> String {
    "admin@clinic.com".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
