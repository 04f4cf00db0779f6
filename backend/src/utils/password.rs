//! bcrypt password hashing helpers.
//!
//! bcrypt ignores everything past the first 72 bytes of its input, so the
//! non-truncating variants are used: a longer password is refused instead of
//! being hashed down to a prefix other passwords could share.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};

/// Function to hash a password before storing in database
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - bcrypt work factor
///
/// # Errors
/// Returns a validation error for passwords longer than 72 bytes and
/// `ServiceError::InternalError` if hashing fails
pub fn hash_password(password: &str, cost: u32) -> ServiceResult<String> {
    non_truncating_hash(password, cost).map_err(|e| match e {
        BcryptError::Truncation(_) => ServiceError::validation("Password must be at most 72 bytes"),
        e => ServiceError::internal_error(format!("Password hashing failed: {}", e)),
    })
}

/// Function to verify a password against the stored hash
///
/// A password longer than 72 bytes can never have been stored, so it never matches.
///
/// # Errors
/// Returns `ServiceError` if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
    match non_truncating_verify(password, hash) {
        Ok(matched) => Ok(matched),
        Err(BcryptError::Truncation(_)) => Ok(false),
        Err(e) => Err(ServiceError::internal_error(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
