//! Master password gate
//!
//! The vault never stores the master password. Instead it persists a
//! single "canary" envelope: a fixed plaintext encrypted under the master
//! password. Successfully decrypting the canary back to that constant is
//! the sole proof that a candidate password is correct, and the presence
//! or absence of the canary file is the sole signal distinguishing a
//! fresh vault from a locked one.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::crypto::{self, SessionPassword};
use crate::error::{Result, VaultError};

/// Fixed plaintext sealed into the canary envelope
const CANARY_PLAINTEXT: &str = "tinyvault-canary-v1";

/// Canary file name inside the vault directory
const CANARY_FILE: &str = "lockfile";

/// Vault state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// No canary persisted - a master password must be created
    Uninitialized,
    /// Canary exists but no password has been verified this session
    Locked,
    /// A password has been verified and is held for the session
    Unlocked,
    /// Vault and canary removed; the process must restart to start over
    Deleted,
}

/// Owns the persisted canary and the unlock state machine
pub struct MasterPasswordGate {
    base_dir: PathBuf,
    canary_path: PathBuf,
    state: VaultState,
}

impl MasterPasswordGate {
    /// Open the gate over a vault directory, creating the directory if
    /// needed. The initial state is derived from canary presence.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_dir)?;

        let canary_path = base_dir.join(CANARY_FILE);
        let state = if canary_path.exists() {
            VaultState::Locked
        } else {
            VaultState::Uninitialized
        };

        debug!("Gate opened at {:?} in state {:?}", base_dir, state);

        Ok(Self {
            base_dir,
            canary_path,
            state,
        })
    }

    /// Get the current vault state
    pub fn state(&self) -> VaultState {
        self.state
    }

    /// Check if the vault is unlocked
    pub fn is_unlocked(&self) -> bool {
        self.state == VaultState::Unlocked
    }

    /// The directory holding the canary and the record database
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the master password by persisting the canary envelope
    ///
    /// Only valid while no canary exists. The vault transitions to
    /// `Locked`; the caller verifies the password to unlock.
    pub async fn set_master_password(&mut self, password: &str) -> Result<()> {
        match self.state {
            VaultState::Uninitialized => {}
            VaultState::Deleted => return Err(VaultError::VaultDeleted),
            _ => return Err(VaultError::AlreadyInitialized),
        }

        let canary = crypto::seal(password, CANARY_PLAINTEXT)?;
        tokio::fs::write(&self.canary_path, &canary).await?;

        self.state = VaultState::Locked;

        info!("Master password created");
        Ok(())
    }

    /// Verify a candidate master password against the persisted canary
    ///
    /// On success the vault transitions to `Unlocked` and the password is
    /// returned as the session's key material. On failure the vault stays
    /// `Locked` with a generic invalid-password error; attempts are
    /// retryable indefinitely.
    pub async fn verify(&mut self, candidate: &str) -> Result<SessionPassword> {
        match self.state {
            VaultState::Uninitialized => return Err(VaultError::MissingCanary),
            VaultState::Deleted => return Err(VaultError::VaultDeleted),
            _ => {}
        }

        self.check_canary(candidate).await?;
        self.state = VaultState::Unlocked;

        info!("Vault unlocked");
        Ok(SessionPassword::new(candidate.to_string()))
    }

    /// Delete the entire vault: canary, records, the whole directory
    ///
    /// The candidate password is re-verified first as a safety
    /// confirmation. Afterwards the gate is `Deleted` and unusable; a new
    /// process run starts over in `Uninitialized`.
    pub async fn delete_vault(&mut self, candidate: &str) -> Result<()> {
        match self.state {
            VaultState::Uninitialized => return Err(VaultError::MissingCanary),
            VaultState::Deleted => return Err(VaultError::VaultDeleted),
            _ => {}
        }

        self.check_canary(candidate).await?;

        tokio::fs::remove_dir_all(&self.base_dir).await?;
        self.state = VaultState::Deleted;

        info!("Vault deleted");
        Ok(())
    }

    /// Decrypt the canary with the candidate password and compare against
    /// the expected constant. Wrong password, tampered canary, and a
    /// mismatched plaintext all fail identically.
    async fn check_canary(&self, candidate: &str) -> Result<()> {
        let canary = match tokio::fs::read_to_string(&self.canary_path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VaultError::MissingCanary)
            }
            Err(e) => return Err(e.into()),
        };

        let plaintext = crypto::open(candidate, canary.trim())?;
        if plaintext != CANARY_PLAINTEXT {
            return Err(VaultError::AuthenticationFailure);
        }

        debug!("Master password verified");
        Ok(())
    }
}
