//! Password hashing.

use bcrypt::{BcryptError, hash, verify};

pub use bcrypt::DEFAULT_COST;

/// Hash a plaintext password with bcrypt at the given work factor.
///
/// # Errors
///
/// Returns an error when `cost` is outside bcrypt's accepted range.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error when the stored hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}
