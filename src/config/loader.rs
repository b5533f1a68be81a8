//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{MeridianConfig, StorageBackend};
use crate::config::SecretValue;
use crate::domain::errors::MeridianError;
use crate::domain::result::Result;
use regex::Regex;
use secrecy::Secret;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into MeridianConfig
/// 4. Applies environment variable overrides (`MERIDIAN_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing fails, a referenced
/// environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use meridian::config::load_config;
///
/// let config = load_config("meridian.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MeridianConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MeridianError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MeridianError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MeridianConfig = toml::from_str(&contents)
        .map_err(|e| MeridianError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MeridianError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. Returns an error listing every
/// referenced variable that is not set.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MeridianError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `MERIDIAN_*` prefix
///
/// Variables follow the pattern `MERIDIAN_<SECTION>_<KEY>`, e.g.
/// `MERIDIAN_STORAGE_BACKEND` or `MERIDIAN_BOOTSTRAP_ADMIN_EMAIL`.
fn apply_env_overrides(config: &mut MeridianConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("MERIDIAN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("MERIDIAN_STORAGE_BACKEND") {
        config.storage.backend = match val.as_str() {
            "memory" => StorageBackend::Memory,
            "file" => StorageBackend::File,
            other => {
                return Err(MeridianError::Configuration(format!(
                    "Invalid MERIDIAN_STORAGE_BACKEND '{other}'. Must be 'memory' or 'file'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("MERIDIAN_STORAGE_DATA_DIR") {
        config.storage.data_dir = Some(val);
    }

    // Auth overrides
    if let Ok(val) = std::env::var("MERIDIAN_AUTH_SESSION_TTL_HOURS") {
        if let Ok(hours) = val.parse() {
            config.auth.session_ttl_hours = hours;
        }
    }

    // Bootstrap overrides
    if let Ok(val) = std::env::var("MERIDIAN_BOOTSTRAP_ADMIN_EMAIL") {
        config.bootstrap.admin_email = val;
    }
    if let Ok(val) = std::env::var("MERIDIAN_BOOTSTRAP_ADMIN_PASSWORD") {
        config.bootstrap.admin_password = Some(Secret::new(SecretValue::from(val)));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MERIDIAN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MERIDIAN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
