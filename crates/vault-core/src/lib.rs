//! # vault-core
//!
//! Core functionality for TinyVault including:
//! - AES-256-GCM encryption envelopes with PBKDF2 key derivation
//! - Canary-based master password verification (the password itself is
//!   never stored)
//! - SQLite record storage for encrypted credentials
//! - CSV import/export adapters

pub mod crypto;
pub mod error;
pub mod gate;
pub mod service;
pub mod store;
pub mod transfer;

pub use crypto::SessionPassword;
pub use error::{Result, VaultError};
pub use gate::{MasterPasswordGate, VaultState};
pub use service::{generate_password, CredentialEncryptionService};
pub use store::{NewRecord, Record, RecordStore};
pub use transfer::{export_records, read_records, ImportFormat, PlainRecord};
