//! Per-record encryption service
//!
//! Thin orchestration over the envelope codec, parameterized by the
//! session's verified master password. No key is cached between calls:
//! every envelope carries its own salt, so each encrypt and decrypt
//! re-derives its key independently.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use crate::crypto::{self, SessionPassword};
use crate::error::{Result, VaultError};

/// Encrypts and decrypts individual record secrets under the session's
/// master password
pub struct CredentialEncryptionService {
    master: SessionPassword,
}

impl CredentialEncryptionService {
    /// Create a service from the session password returned by
    /// [`crate::gate::MasterPasswordGate::verify`]
    pub fn new(master: SessionPassword) -> Self {
        Self { master }
    }

    /// Encrypt one secret for storage, producing an independent envelope
    /// with its own fresh salt and nonce. Bulk import calls this once per
    /// row; identical plaintexts still yield distinct envelopes.
    pub fn encrypt_secret(&self, secret: &str) -> Result<String> {
        crypto::seal(self.master.expose(), secret)
    }

    /// Decrypt one stored envelope for reveal or export
    ///
    /// Once the vault is unlocked this only fails on data corruption,
    /// which surfaces as the same generic authentication failure as a
    /// wrong password.
    pub fn reveal_secret(&self, envelope: &str) -> Result<String> {
        let plaintext = crypto::open(self.master.expose(), envelope)?;
        debug!("Decrypted one record secret");
        Ok(plaintext)
    }
}

/// Generate a random password: 32 bytes from the OS CSPRNG, base64-encoded
pub fn generate_password() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| VaultError::RandomSourceUnavailable)?;
    Ok(BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> CredentialEncryptionService {
        CredentialEncryptionService::new(SessionPassword::new("masterpw".to_string()))
    }

    #[test]
    fn test_encrypt_reveal_roundtrip() {
        let service = test_service();

        let envelope = service.encrypt_secret("foo").unwrap();
        assert_eq!(service.reveal_secret(&envelope).unwrap(), "foo");
    }

    #[test]
    fn test_other_session_cannot_reveal() {
        let service = test_service();
        let envelope = service.encrypt_secret("foo").unwrap();

        let other = CredentialEncryptionService::new(SessionPassword::new("otherpw".to_string()));
        assert!(matches!(
            other.reveal_secret(&envelope),
            Err(VaultError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_bulk_import_envelopes_are_distinct() {
        let service = test_service();

        // Three rows, two sharing the identical plaintext password
        let rows = ["swordfish", "swordfish", "correct horse"];
        let envelopes: Vec<String> = rows
            .iter()
            .map(|pw| service.encrypt_secret(pw).unwrap())
            .collect();

        assert_ne!(envelopes[0], envelopes[1]);
        assert_ne!(envelopes[0], envelopes[2]);
        assert_ne!(envelopes[1], envelopes[2]);

        for (row, envelope) in rows.iter().zip(&envelopes) {
            assert_eq!(service.reveal_secret(envelope).unwrap(), *row);
        }
    }

    #[test]
    fn test_corrupted_envelope_fails() {
        let service = test_service();
        let envelope = service.encrypt_secret("foo").unwrap();

        let corrupted: String = envelope.chars().rev().collect();
        assert!(service.reveal_secret(&corrupted).is_err());
    }

    #[test]
    fn test_generate_password() {
        let p1 = generate_password().unwrap();
        let p2 = generate_password().unwrap();

        assert_ne!(p1, p2);
        // 32 bytes of entropy, base64-encoded
        assert_eq!(BASE64.decode(&p1).unwrap().len(), 32);
    }
}
