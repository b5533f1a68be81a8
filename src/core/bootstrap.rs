//! Operator bootstrap
//!
//! Explicit, idempotent seeding of the initial administrator account. The
//! original system ran this as a side effect of loading the application
//! layer; here it is an operation an operator invokes deliberately
//! (`meridian bootstrap`), and running it twice is safe.

use crate::adapters::auth::traits::CredentialHasher;
use crate::adapters::store::traits::AccountStore;
use crate::domain::account::{Account, Role};
use crate::domain::errors::DomainError;
use crate::domain::ids::AccountId;
use crate::domain::Result;
use chrono::Utc;
use std::sync::Arc;

/// What the bootstrap run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The admin account was created
    Created { account_id: AccountId },
    /// An account with the admin email already existed; nothing was changed
    AlreadyExisted { account_id: AccountId },
}

/// Ensure the administrator account exists
///
/// Idempotent: a second run with the same email reports `AlreadyExisted`
/// and changes nothing, including the stored credential hash. A concurrent
/// duplicate registration loses against the store's unique email index and
/// is reported as `AlreadyExisted` as well.
///
/// # Errors
///
/// `Validation` if the password is empty; storage errors pass through.
pub async fn bootstrap_admin(
    accounts: &Arc<dyn AccountStore>,
    hasher: &Arc<dyn CredentialHasher>,
    email: &str,
    username: &str,
    password: &str,
) -> Result<BootstrapOutcome> {
    if password.is_empty() {
        return Err(DomainError::Validation("bootstrap admin password is required".to_string()).into());
    }

    let email = Account::normalize_email(email);
    if let Some(existing) = accounts.find_account_by_email(&email).await? {
        tracing::info!(account_id = %existing.id, "Admin account already present");
        return Ok(BootstrapOutcome::AlreadyExisted {
            account_id: existing.id,
        });
    }

    let now = Utc::now();
    let account = Account {
        id: AccountId::generate(),
        email: email.clone(),
        credential_hash: hasher.hash(password)?,
        role: Role::Admin,
        username: Some(username.to_string()),
        profile: None,
        is_active: true,
        last_login: None,
        created_at: now,
        updated_at: now,
    };

    match accounts.insert_account(account).await {
        Ok(created) => {
            tracing::info!(account_id = %created.id, %email, "Admin account created");
            Ok(BootstrapOutcome::Created {
                account_id: created.id,
            })
        }
        // Lost a race against another bootstrap run; treat as already done.
        Err(err) if matches!(err.as_domain(), Some(DomainError::Validation(_))) => {
            let existing = accounts
                .find_account_by_email(&email)
                .await?
                .ok_or(err)?;
            Ok(BootstrapOutcome::AlreadyExisted {
                account_id: existing.id,
            })
        }
        Err(err) => Err(err),
    }
}
