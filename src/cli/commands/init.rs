//! Init command implementation
//!
//! Generates a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "meridian.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Meridian configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set MERIDIAN_BOOTSTRAP_ADMIN_PASSWORD in the environment");
                println!("  3. Validate configuration: meridian validate-config");
                println!("  4. Seed the admin account: meridian bootstrap");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn generate_config() -> String {
        r#"# Meridian Configuration File
# Clinic management core

environment = "development"  # development | staging | production

[application]
log_level = "info"

[storage]
backend = "file"  # memory | file
data_dir = "data"

[auth]
# Bearer session token lifetime
session_ttl_hours = 168
min_password_length = 8

[bootstrap]
admin_email = "admin@clinic.com"
admin_username = "admin"
admin_password = "${MERIDIAN_BOOTSTRAP_ADMIN_PASSWORD}"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly
"#
        .to_string()
    }
}
