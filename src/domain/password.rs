//! Salted, iterated SHA-256 password digests.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of SHA-256 rounds applied to every password.
pub const HASH_ITERATIONS: u32 = 1000;

const SALT_LEN: usize = 16;

/// Stored form of a password: hex digest plus the hex salt it was made with.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    hash: String,
    salt: String,
}

impl PasswordHash {
    /// Hash `password` under a fresh random salt.
    #[must_use]
    pub fn generate(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let hash = digest(&salt, password);
        Self {
            hash,
            salt: hex::encode(salt),
        }
    }

    /// Rebuild a stored hash as read back from the database.
    pub fn from_parts(hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            salt: salt.into(),
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Whether `password` produces this digest. A malformed salt never matches.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let Ok(salt) = hex::decode(&self.salt) else {
            return false;
        };
        let candidate = digest(&salt, password);
        constant_time_eq(candidate.as_bytes(), self.hash.as_bytes())
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHash").finish_non_exhaustive()
    }
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut round = hasher.finalize();
    for _ in 1..HASH_ITERATIONS {
        round = Sha256::digest(round);
    }
    hex::encode(round)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
