//! Error types for vault-core

use thiserror::Error;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault error types
///
/// Decryption failures are deliberately uniform: a wrong password, a
/// tampered envelope, and a truncated or unparseable envelope all surface
/// as [`VaultError::AuthenticationFailure`]. Callers must not be able to
/// tell these apart.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Invalid password")]
    AuthenticationFailure,

    #[error("No master password set - create one first")]
    MissingCanary,

    #[error("Master password already set")]
    AlreadyInitialized,

    #[error("Vault is locked - verify the master password first")]
    VaultLocked,

    #[error("Vault has been deleted")]
    VaultDeleted,

    #[error("Secure random source unavailable")]
    RandomSourceUnavailable,

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] rusqlite::Error),

    #[error("Import/export error: {0}")]
    TransferError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
