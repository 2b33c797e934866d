//! Password-based key derivation using PBKDF2-HMAC-SHA256
//!
//! The iteration count and hash algorithm are fixed constants of the
//! envelope format: every stored envelope was written with these exact
//! parameters, so changing them would orphan existing data.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use super::DerivedKey;
use crate::error::{Result, VaultError};

/// Salt length in bytes (fixed by the envelope wire format)
pub const SALT_LEN: usize = 16;

/// PBKDF2 iteration count
const PBKDF2_ITERATIONS: u32 = 100_000;

/// Generate a cryptographically secure random 16-byte salt
///
/// Fails with [`VaultError::RandomSourceUnavailable`] if the OS entropy
/// source cannot be read; encryption must never proceed with a
/// predictable salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|_| VaultError::RandomSourceUnavailable)?;
    Ok(salt)
}

/// Derive a 256-bit key from a password and salt
///
/// Deterministic: the same password and salt always yield the same key,
/// which is what lets decryption reproduce the key used at encryption
/// time from the salt stored in the envelope.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> DerivedKey {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey::new(key)
}
