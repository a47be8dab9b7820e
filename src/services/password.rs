//! Password hashing for registration.
//!
//! `PasswordHasher` is the seam; `Argon2Hasher` (Argon2id, default params) is
//! the implementation wired into `AppState`. Hashes are PHC strings.

use std::fmt;

use argon2::{Argon2, PasswordHasher as _, password_hash::SaltString};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

impl From<argon2::password_hash::Error> for HashError {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self(e.to_string())
    }
}

/// CPU-bound: callers run it off the async executor.
pub trait PasswordHasher: fmt::Debug + Send + Sync {
    fn hash(&self, password: &str) -> Result<String, HashError>;
}

#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        // 16 random bytes from a v4 uuid
        let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())?;
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }
}
