//! Authentication seams
//!
//! The credential-hashing and token-issuance mechanisms are deployment
//! concerns: the core only consumes these two traits. The crate ships
//! working in-process implementations ([`super::SaltedSha256Hasher`],
//! [`super::MemoryTokenIssuer`]); a deployment fronting real traffic swaps
//! in its own (e.g. bcrypt or argon2 behind `CredentialHasher`).

use crate::domain::ids::AccountId;
use crate::domain::Result;
use async_trait::async_trait;

/// Hashes and verifies account credentials
pub trait CredentialHasher: Send + Sync {
    /// Produce an opaque hash for storage
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails (e.g. RNG failure).
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a candidate password against a stored hash
    ///
    /// Unparseable hashes verify as `false`, never as an error: a corrupt
    /// stored hash must not let a caller distinguish it from a wrong
    /// password.
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Issues and validates bearer session tokens
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issue a fresh bearer token for the account
    async fn issue(&self, account_id: &AccountId) -> Result<String>;

    /// Resolve a bearer token to the account it was issued for
    ///
    /// Returns `Ok(None)` for unknown, expired, or revoked tokens.
    async fn validate(&self, token: &str) -> Result<Option<AccountId>>;

    /// Invalidate a token before its natural expiry
    async fn revoke(&self, token: &str) -> Result<()>;
}
