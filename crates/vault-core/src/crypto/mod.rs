//! Cryptographic primitives for the vault
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption envelopes
//! - PBKDF2-HMAC-SHA256 key derivation from the master password
//! - Secure memory handling with zeroize

mod envelope;
mod key_derivation;
mod secure_memory;

pub use envelope::{open, seal, NONCE_LEN};
pub use key_derivation::{derive_key, generate_salt, SALT_LEN};
pub use secure_memory::{DerivedKey, SessionPassword};
