//! Authentication adapters: credential hashing and session tokens

pub mod hasher;
pub mod session;
pub mod traits;

pub use hasher::SaltedSha256Hasher;
pub use session::MemoryTokenIssuer;
pub use traits::{CredentialHasher, TokenIssuer};
