//! Bootstrap command implementation
//!
//! Seeds the administrator account as an explicit operator action. Safe to
//! re-run; an existing admin is reported, not modified.

use crate::adapters::auth::traits::CredentialHasher;
use crate::adapters::auth::SaltedSha256Hasher;
use crate::adapters::store::create_stores;
use crate::config::load_config;
use crate::core::bootstrap::{bootstrap_admin, BootstrapOutcome};
use crate::domain::errors::MeridianError;
use clap::Args;
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Arguments for the bootstrap command
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Admin email; overrides the configured bootstrap.admin_email
    #[arg(long)]
    pub email: Option<String>,

    /// Admin password; falls back to bootstrap.admin_password from config
    #[arg(long, env = "MERIDIAN_BOOTSTRAP_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl BootstrapArgs {
    /// Execute the bootstrap command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let email = self
            .email
            .clone()
            .unwrap_or_else(|| config.bootstrap.admin_email.clone());

        let password = match (&self.password, &config.bootstrap.admin_password) {
            (Some(p), _) => p.clone(),
            (None, Some(secret)) => secret.expose_secret().as_ref().to_string(),
            (None, None) => {
                println!("❌ No admin password available");
                println!("   Pass --password or set bootstrap.admin_password in the config");
                return Ok(2);
            }
        };

        let stores = create_stores(&config)?;
        let hasher: Arc<dyn CredentialHasher> = Arc::new(SaltedSha256Hasher::new());

        println!("🔧 Bootstrapping admin account: {email}");
        match bootstrap_admin(
            &stores.accounts,
            &hasher,
            &email,
            &config.bootstrap.admin_username,
            &password,
        )
        .await
        {
            Ok(BootstrapOutcome::Created { account_id }) => {
                println!("✅ Admin account created ({account_id})");
                Ok(0)
            }
            Ok(BootstrapOutcome::AlreadyExisted { account_id }) => {
                println!("✅ Admin account already exists ({account_id}); nothing to do");
                Ok(0)
            }
            Err(MeridianError::Domain(e)) => {
                println!("❌ Bootstrap rejected: {e}");
                Ok(3) // Domain failure exit code
            }
            Err(e) => {
                println!("❌ Bootstrap failed");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
