//! Secure memory handling with automatic zeroization

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key derived from the master password - automatically zeroed
/// when dropped. Exists only for the duration of a single encrypt or
/// decrypt call; never persisted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; 32],
}

impl DerivedKey {
    /// Create a new derived key from raw bytes
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Get the key bytes (use carefully - avoid copying)
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// The verified master password, held in memory for the lifetime of an
/// unlocked session and zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SessionPassword {
    value: String,
}

impl SessionPassword {
    /// Create a new session password
    pub fn new(value: String) -> Self {
        Self { value }
    }

    /// Get the password (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for SessionPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPassword")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_key_bytes() {
        let bytes = [42u8; 32];
        let key = DerivedKey::new(bytes);
        assert_eq!(key.as_bytes(), &bytes);
    }

    #[test]
    fn test_session_password_expose() {
        let pw = SessionPassword::new("hunter2".to_string());
        assert_eq!(pw.expose(), "hunter2");
    }

    #[test]
    fn test_debug_redacted() {
        let key = DerivedKey::new([7u8; 32]);
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains('7'));

        let pw = SessionPassword::new("topsecret".to_string());
        let debug = format!("{:?}", pw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("topsecret"));
    }
}
