//! In-process bearer session tokens
//!
//! Tokens are 32 random bytes, base64url on the wire. At rest only the
//! SHA-256 digest of the token is kept, so a leaked session table cannot be
//! replayed. Sessions live for the configured TTL and die with the process;
//! they are deliberately not written to the document store.

use crate::adapters::auth::traits::TokenIssuer;
use crate::domain::errors::MeridianError;
use crate::domain::ids::AccountId;
use crate::domain::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::RwLock;

struct Session {
    account_id: AccountId,
    expires_at: DateTime<Utc>,
}

/// In-process token issuer with TTL expiry
pub struct MemoryTokenIssuer {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl MemoryTokenIssuer {
    /// Creates an issuer whose tokens live for `ttl_hours`
    pub fn new(ttl_hours: u32) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::hours(i64::from(ttl_hours)),
        }
    }

    fn digest(token: &str) -> String {
        URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
    }
}

#[async_trait]
impl TokenIssuer for MemoryTokenIssuer {
    async fn issue(&self, account_id: &AccountId) -> Result<String> {
        let mut bytes = [0u8; 32];
        rand::thread_rng()
            .try_fill_bytes(&mut bytes)
            .map_err(|e| MeridianError::Other(format!("RNG failure: {e}")))?;
        let token = URL_SAFE_NO_PAD.encode(bytes);

        let mut sessions = self.sessions.write().await;
        sessions.insert(
            Self::digest(&token),
            Session {
                account_id: account_id.clone(),
                expires_at: Utc::now() + self.ttl,
            },
        );
        Ok(token)
    }

    async fn validate(&self, token: &str) -> Result<Option<AccountId>> {
        let digest = Self::digest(token);
        let sessions = self.sessions.read().await;
        match sessions.get(&digest) {
            Some(session) if session.expires_at > Utc::now() => {
                Ok(Some(session.account_id.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        let digest = Self::digest(token);
        self.sessions.write().await.remove(&digest);
        Ok(())
    }
}
