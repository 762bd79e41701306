//! SHA-256 digest computation.

use crate::VerimockError;
use sha2::{Digest, Sha256};

/// Compute SHA-256 of `data` and return the lowercase hex encoding.
///
/// The result is always 64 characters long.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    hex::encode(hash)
}

/// Digest of the literal concatenation `data || salt`, no separator.
pub fn salted_digest(data: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare the digest of `input` with a presented hex digest.
///
/// The comparison is exact: uppercase hex is not accepted.
///
/// # Returns
/// * `Ok(())` - If the presented value matches
/// * `Err(AuthenticationFailed)` - Otherwise
pub fn verify_hex_digest(input: &str, presented: &str) -> Result<(), VerimockError> {
    let computed = sha256_hex(input.as_bytes());

    if computed != presented {
        return Err(VerimockError::AuthenticationFailed);
    }

    Ok(())
}
