//! Salted, iterated SHA-256 credential hasher
//!
//! Default [`CredentialHasher`] implementation used by the operator CLI and
//! the test-suite. Stored format: `sha256$<iterations>$<salt>$<digest>` with
//! base64url fields. Deployments with hostile-network exposure should swap
//! in a memory-hard hasher behind the same trait; the iteration count here
//! is the only work factor.

use crate::adapters::auth::traits::CredentialHasher;
use crate::domain::errors::MeridianError;
use crate::domain::Result;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SCHEME: &str = "sha256";
const DEFAULT_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;

/// Salted, iterated SHA-256 hasher
pub struct SaltedSha256Hasher {
    iterations: u32,
}

impl SaltedSha256Hasher {
    /// Creates a hasher with the default work factor
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Creates a hasher with an explicit iteration count (tests use a low
    /// count to stay fast)
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    fn digest(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
        let mut acc = Sha256::new()
            .chain_update(salt)
            .chain_update(password.as_bytes())
            .finalize();
        for _ in 1..iterations {
            acc = Sha256::digest(&acc);
        }
        acc.to_vec()
    }
}

impl Default for SaltedSha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for SaltedSha256Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng()
            .try_fill_bytes(&mut salt)
            .map_err(|e| MeridianError::Other(format!("RNG failure: {e}")))?;

        let digest = Self::digest(password, &salt, self.iterations);
        Ok(format!(
            "{SCHEME}${}${}${}",
            self.iterations,
            URL_SAFE_NO_PAD.encode(salt),
            URL_SAFE_NO_PAD.encode(digest)
        ))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let mut parts = stored.split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(digest), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return false;
        };
        if scheme != SCHEME {
            return false;
        }
        let Ok(iterations) = iterations.parse::<u32>() else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (
            URL_SAFE_NO_PAD.decode(salt),
            URL_SAFE_NO_PAD.decode(digest),
        ) else {
            return false;
        };

        let candidate = Self::digest(password, &salt, iterations);

        // Constant-time comparison.
        candidate.len() == expected.len()
            && candidate
                .iter()
                .zip(expected.iter())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}
