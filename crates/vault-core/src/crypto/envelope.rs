//! AES-256-GCM authenticated encryption envelope
//!
//! Wire format: `base64( salt || nonce || ciphertext‖tag )`
//! - Salt: 16 bytes, consumed by key derivation
//! - Nonce: 12 bytes (96 bits) - standard for GCM
//! - Ciphertext with the 16-byte auth tag appended, as produced by the cipher
//!
//! The fixed 16/12 offsets are a wire contract: envelopes written by any
//! previous version of the vault must keep decrypting.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use super::key_derivation::{derive_key, generate_salt, SALT_LEN};
use crate::error::{Result, VaultError};

/// Nonce length in bytes (fixed by the envelope wire format)
pub const NONCE_LEN: usize = 12;

/// Encrypt a plaintext under a password, producing the text encoding of a
/// self-describing envelope
///
/// A fresh salt and a fresh nonce are drawn for every call, so encrypting
/// the same plaintext under the same password twice yields two different
/// envelopes. Entropy exhaustion aborts the operation; it is never
/// silently degraded.
pub fn seal(password: &str, plaintext: &str) -> Result<String> {
    let salt = generate_salt()?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|_| VaultError::RandomSourceUnavailable)?;

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::EncryptionError(e.to_string()))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    // aes-gcm appends the 16-byte auth tag to the ciphertext
    let ciphertext_and_tag = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| VaultError::EncryptionError(e.to_string()))?;

    let mut combined = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext_and_tag.len());
    combined.extend_from_slice(&salt);
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext_and_tag);

    Ok(BASE64.encode(combined))
}

/// Decrypt an envelope produced by [`seal`]
///
/// Every failure mode - undecodable text, a blob shorter than the
/// salt+nonce header, an auth tag that does not verify (wrong password or
/// tampered bytes), non-UTF-8 plaintext - is reported uniformly as
/// [`VaultError::AuthenticationFailure`]. No partial plaintext is ever
/// returned, and the caller cannot tell the causes apart.
pub fn open(password: &str, envelope: &str) -> Result<String> {
    let combined = BASE64
        .decode(envelope)
        .map_err(|_| VaultError::AuthenticationFailure)?;

    if combined.len() < SALT_LEN + NONCE_LEN {
        return Err(VaultError::AuthenticationFailure);
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&combined[..SALT_LEN]);
    let nonce = Nonce::from_slice(&combined[SALT_LEN..SALT_LEN + NONCE_LEN]);
    let ciphertext_and_tag = &combined[SALT_LEN + NONCE_LEN..];

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| VaultError::AuthenticationFailure)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext_and_tag)
        .map_err(|_| VaultError::AuthenticationFailure)?;

    String::from_utf8(plaintext).map_err(|_| VaultError::AuthenticationFailure)
}
