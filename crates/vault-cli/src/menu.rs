//! Interactive menu loop
//!
//! An explicit loop over a small set of actions. Every action returns to
//! the menu; only Exit and a completed vault deletion leave it.

use anyhow::Result;
use colored::Colorize;
use directories::BaseDirs;
use vault_core::{
    CredentialEncryptionService, ImportFormat, MasterPasswordGate, NewRecord, Record, RecordStore,
    VaultError,
};

use crate::prompt;

/// Top-level menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Find,
    Add,
    Import,
    Export,
    Exit,
    DeleteVault,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::Find),
            "2" => Some(Self::Add),
            "3" => Some(Self::Import),
            "4" => Some(Self::Export),
            "5" => Some(Self::Exit),
            "6" => Some(Self::DeleteVault),
            _ => None,
        }
    }
}

/// Run the menu until the user exits or deletes the vault
pub async fn run(
    gate: &mut MasterPasswordGate,
    store: &RecordStore,
    service: &CredentialEncryptionService,
) -> Result<()> {
    loop {
        println!("What do you want to do?");
        println!("  1) Find a record");
        println!("  2) Add a record");
        println!("  3) Import records");
        println!("  4) Export records");
        println!("  5) Exit");
        println!("  6) Delete vault");

        let input = prompt::line("> ")?;
        let Some(choice) = MenuChoice::parse(&input) else {
            println!("Unknown choice\n");
            continue;
        };

        match choice {
            MenuChoice::Find => find_record(store, service)?,
            MenuChoice::Add => add_record(store, service)?,
            MenuChoice::Import => import_records(store, service)?,
            MenuChoice::Export => export_records(store, service)?,
            MenuChoice::DeleteVault => {
                if delete_vault(gate).await? {
                    return Ok(());
                }
            }
            MenuChoice::Exit => return Ok(()),
        }
    }
}

fn find_record(store: &RecordStore, service: &CredentialEncryptionService) -> Result<()> {
    let records = store.fetch_all()?;
    if records.is_empty() {
        println!("No records stored yet\n");
        return Ok(());
    }

    let term = prompt::line("Search (empty lists everything): ")?.to_lowercase();
    let matches: Vec<&Record> = records
        .iter()
        .filter(|r| {
            term.is_empty()
                || r.name.to_lowercase().contains(&term)
                || r.website
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&term)
        })
        .collect();

    if matches.is_empty() {
        println!("No matches\n");
        return Ok(());
    }

    for (i, record) in matches.iter().enumerate() {
        println!("  {}) {}", i + 1, record.name);
    }

    let input = prompt::line("Select a record (empty to go back): ")?;
    if input.is_empty() {
        return Ok(());
    }
    let selected = input
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| matches.get(i));
    let Some(record) = selected else {
        println!("Unknown selection\n");
        return Ok(());
    };

    println!(
        "\n  name:     {}\n  username: {}\n  website:  {}\n  created:  {}\n  password: [hidden]\n",
        record.name,
        record.username,
        record.website.as_deref().unwrap_or("-"),
        record.created_at,
    );

    println!("Actions:");
    println!("  1) Reveal password");
    println!("  2) Delete record");
    println!("  3) Go back");

    match prompt::line("> ")?.as_str() {
        "1" => match service.reveal_secret(&record.password) {
            Ok(plaintext) => println!("{plaintext}\n"),
            Err(_) => println!("Could not decrypt record\n"),
        },
        "2" => {
            if prompt::confirm("Are you sure you want to delete this record?")? {
                store.delete(record.id)?;
                println!("Record deleted\n");
            }
        }
        _ => {}
    }

    Ok(())
}

fn add_record(store: &RecordStore, service: &CredentialEncryptionService) -> Result<()> {
    let name = prompt::required("Name: ")?;
    let username = prompt::required("Username: ")?;
    let website = prompt::line("Website (optional): ")?;
    let website = (!website.is_empty()).then_some(website);

    let plaintext = if prompt::confirm("Auto-generate password?")? {
        let generated = vault_core::generate_password()?;
        println!("Generated: {generated}");
        generated
    } else {
        prompt::new_password()?
    };

    let envelope = service.encrypt_secret(&plaintext)?;
    store.insert(&NewRecord {
        name,
        username,
        website,
        password: envelope,
    })?;

    println!("Password added!\n");
    Ok(())
}

fn import_records(store: &RecordStore, service: &CredentialEncryptionService) -> Result<()> {
    println!("Which CSV format are you importing?");
    println!("  1) Standard (id, name, username, password, website, created_at)");
    println!("  2) Bitwarden (folder, ..., login_uri, login_username, login_password, ...)");
    println!("  3) Go back");

    let format = match prompt::line("> ")?.as_str() {
        "1" => ImportFormat::Standard,
        "2" => ImportFormat::Bitwarden,
        _ => return Ok(()),
    };

    let mut path = prompt::required("Enter absolute file path of CSV file: ")?;
    if let (Some(stripped), Some(dirs)) = (path.strip_prefix('~'), BaseDirs::new()) {
        path = format!("{}{}", dirs.home_dir().display(), stripped);
    }

    let rows = match vault_core::read_records(&path, format) {
        Ok(rows) => rows,
        Err(e) => {
            println!("Import failed: {e}\n");
            return Ok(());
        }
    };

    // One independent envelope per row
    let mut imported = 0;
    for row in rows {
        let envelope = service.encrypt_secret(&row.password)?;
        store.insert(&NewRecord {
            name: row.name,
            username: row.username,
            website: row.website,
            password: envelope,
        })?;
        imported += 1;
    }

    println!("{} record{} imported!\n", imported, plural(imported));
    Ok(())
}

fn export_records(store: &RecordStore, service: &CredentialEncryptionService) -> Result<()> {
    let records = store.fetch_all()?;
    let question = format!(
        "Are you sure you want to export {} record{}?",
        records.len(),
        plural(records.len())
    );
    if !prompt::confirm(&question)? {
        return Ok(());
    }

    let mut decrypted = Vec::with_capacity(records.len());
    for record in records {
        let plaintext = match service.reveal_secret(&record.password) {
            Ok(plaintext) => plaintext,
            Err(_) => {
                println!("Could not decrypt record '{}', aborting export\n", record.name);
                return Ok(());
            }
        };
        decrypted.push(Record {
            password: plaintext,
            ..record
        });
    }

    let dirs = BaseDirs::new().ok_or_else(|| anyhow::anyhow!("no home directory"))?;
    let file_name = format!("passwords_{}.csv", chrono::Utc::now().timestamp_millis());
    let path = dirs.home_dir().join("Downloads").join(file_name);

    vault_core::export_records(&path, &decrypted)?;

    println!("Records exported to {}\n", path.display());
    Ok(())
}

/// Returns true when the vault was deleted and the program should exit
async fn delete_vault(gate: &mut MasterPasswordGate) -> Result<bool> {
    let confirmed = prompt::confirm(
        "Are you sure you want to delete your vault? This is irreversible and \
         requires your master password. A new master password must be set on relaunch.",
    )?;
    if !confirmed {
        return Ok(false);
    }

    let candidate = prompt::password("Enter your master password: ")?;
    match gate.delete_vault(&candidate).await {
        Ok(()) => {
            println!("{}", "Vault deleted".red());
            Ok(true)
        }
        Err(e @ VaultError::AuthenticationFailure) => {
            println!("{e}\n");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
