//! TinyVault - a tiny local password manager
//!
//! Single-user interactive vault. The master password gates everything:
//! on first run the user creates one, on every later run it is verified
//! against the persisted canary before any record can be touched.

use anyhow::{anyhow, Result};
use colored::Colorize;
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

use vault_core::{CredentialEncryptionService, MasterPasswordGate, RecordStore, VaultState};

mod menu;
mod prompt;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "########################".blue());
    println!("{}", "TinyVault v0.1.0".blue());
    println!("{}", "########################".blue());
    println!();

    let base_dir = ProjectDirs::from("com", "tinyvault", "tinyvault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine data directory"))?;

    let mut gate = MasterPasswordGate::new(base_dir)?;

    if gate.state() == VaultState::Uninitialized {
        println!(
            "No master password found, you must create a master password before continuing."
        );
        let password = prompt::new_password()?;
        gate.set_master_password(&password).await?;
        println!("Master password successfully created.");
    }

    // Retryable indefinitely; the core reports a generic failure only
    let session = loop {
        let candidate = prompt::password("Enter your master password: ")?;
        match gate.verify(&candidate).await {
            Ok(session) => break session,
            Err(e) => println!("{e}"),
        }
    };

    let store = RecordStore::open(gate.base_dir().join("vault.db"))?;
    let service = CredentialEncryptionService::new(session);

    let count = store.count()?;
    println!(
        "Vault unlocked ({} record{})\n",
        count,
        if count == 1 { "" } else { "s" }
    );

    menu::run(&mut gate, &store, &service).await
}
