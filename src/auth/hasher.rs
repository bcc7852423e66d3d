//! Password digest for the custom login backend.
//!
//! The deployed backend compares a SHA-256 hex digest of the password with an
//! empty salt appended. Determinism and the exact digest format are wire
//! contract; strengthening the scheme (per-user salt, a KDF) requires a
//! coordinated backend change.

use sha2::{Digest, Sha256};

/// Salt appended to the password before hashing. Empty by backend contract.
const SALT: &str = "";

/// One-way transform of a plaintext password into the digest sent over the
/// wire: lowercase hex, 64 characters, deterministic.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(SALT.as_bytes());
    hex::encode(hasher.finalize())
}
