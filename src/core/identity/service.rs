//! Identity and role store
//!
//! Registration, login, and bearer-token authentication over the account
//! collection. Every downstream ledger operation assumes its caller was
//! already authenticated and role-checked here; the ledgers never re-derive
//! identity themselves.
//!
//! Email uniqueness is NOT pre-checked with a lookup: the store's insert
//! enforces it atomically, so two concurrent registrations for the same
//! email cannot both succeed.

use crate::adapters::auth::traits::{CredentialHasher, TokenIssuer};
use crate::adapters::store::traits::{AccountStore, ClinicStores};
use crate::config::AuthConfig;
use crate::core::identity::policy::{required_roles, Operation};
use crate::domain::account::{Account, Role};
use crate::domain::errors::DomainError;
use crate::domain::ids::AccountId;
use crate::domain::Result;
use chrono::Utc;
use std::sync::Arc;

/// Registration request
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub username: Option<String>,
    /// Raw id of an already-created role-specific profile document
    pub profile: Option<String>,
}

/// Identity and role store operations
pub struct IdentityService {
    accounts: Arc<dyn AccountStore>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
    min_password_length: usize,
}

impl IdentityService {
    /// Creates the service over the wired store set and auth seams
    pub fn new(
        stores: &ClinicStores,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
        auth: &AuthConfig,
    ) -> Self {
        Self {
            accounts: stores.accounts.clone(),
            hasher,
            tokens,
            min_password_length: auth.min_password_length,
        }
    }

    /// Create a new account
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed email, a too-short password, or an
    /// already-registered email (case-insensitive).
    pub async fn register(&self, request: RegisterRequest) -> Result<Account> {
        let email = Account::normalize_email(&request.email);
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation(format!(
                "'{}' is not a valid email",
                request.email
            ))
            .into());
        }
        if request.password.len() < self.min_password_length {
            return Err(DomainError::Validation(format!(
                "password must be at least {} characters",
                self.min_password_length
            ))
            .into());
        }

        let now = Utc::now();
        let account = Account {
            id: AccountId::generate(),
            email,
            credential_hash: self.hasher.hash(&request.password)?,
            role: request.role,
            username: request.username,
            profile: request.profile,
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.accounts.insert_account(account).await?;
        tracing::info!(account_id = %created.id, role = %created.role, "Account registered");
        Ok(created)
    }

    /// Authenticate with email and password, returning a bearer token
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown email, a wrong password, or an
    /// inactive account. The three cases are deliberately indistinguishable
    /// to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Account, String)> {
        let account = self
            .accounts
            .find_account_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !account.is_active || !self.hasher.verify(password, &account.credential_hash) {
            return Err(DomainError::InvalidCredentials.into());
        }

        let mut account = account;
        account.last_login = Some(Utc::now());
        account.updated_at = Utc::now();
        let account = self.accounts.update_account(account).await?;

        let token = self.tokens.issue(&account.id).await?;
        tracing::info!(account_id = %account.id, "Login succeeded");
        Ok((account, token))
    }

    /// Resolve a bearer token to its active account
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for unknown, expired, or revoked tokens, and
    /// for accounts that have been deactivated since the token was issued.
    pub async fn authenticate(&self, token: &str) -> Result<Account> {
        let account_id = self
            .tokens
            .validate(token)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let account = self
            .accounts
            .get_account(&account_id)
            .await?
            .filter(|a| a.is_active)
            .ok_or(DomainError::InvalidCredentials)?;
        Ok(account)
    }

    /// Invalidate a bearer token
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.tokens.revoke(token).await
    }

    /// Check that the account's role may invoke the operation
    ///
    /// # Errors
    ///
    /// `Forbidden` if the role is not in the operation's allowed set.
    pub fn authorize(&self, account: &Account, operation: Operation) -> Result<()> {
        match required_roles(operation) {
            Some(roles) if !roles.contains(&account.role) => {
                tracing::warn!(
                    account_id = %account.id,
                    role = %account.role,
                    operation = ?operation,
                    "Authorization denied"
                );
                Err(DomainError::Forbidden.into())
            }
            _ => Ok(()),
        }
    }
}
