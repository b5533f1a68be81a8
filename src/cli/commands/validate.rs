//! Validate config command implementation

use crate::config::{load_config, StorageBackend};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match config.storage.backend {
            StorageBackend::Memory => println!("  Storage Backend: memory (process-lifetime)"),
            StorageBackend::File => {
                println!("  Storage Backend: file");
                if let Some(dir) = &config.storage.data_dir {
                    println!("  Data Directory: {dir}");
                }
            }
        }
        println!("  Session TTL: {} hours", config.auth.session_ttl_hours);
        println!("  Bootstrap Admin: {}", config.bootstrap.admin_email);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );

        Ok(0)
    }
}
