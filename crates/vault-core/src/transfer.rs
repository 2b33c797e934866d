//! CSV import/export adapter
//!
//! Maps external CSV layouts onto plaintext record tuples. This layer
//! carries no cryptographic semantics: the caller hands each plaintext
//! password to the encryption service one at a time (import) or decrypts
//! each envelope before export.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::store::Record;

/// Supported import layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// `id,name,username,password,website,created_at` (our own export)
    Standard,
    /// Bitwarden's export layout (`login_uri`, `login_username`, ...)
    Bitwarden,
}

/// One plaintext record tuple produced by import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainRecord {
    pub name: String,
    pub username: String,
    pub website: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct StandardRow {
    name: String,
    username: String,
    #[serde(default)]
    website: Option<String>,
    password: String,
}

#[derive(Debug, Deserialize)]
struct BitwardenRow {
    name: String,
    #[serde(default)]
    login_uri: Option<String>,
    #[serde(default)]
    login_username: String,
    #[serde(default)]
    login_password: String,
}

/// Read plaintext records from a CSV file in the given layout
pub fn read_records<P: AsRef<Path>>(path: P, format: ImportFormat) -> Result<Vec<PlainRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    match format {
        ImportFormat::Standard => {
            for row in reader.deserialize() {
                let row: StandardRow = row?;
                records.push(PlainRecord {
                    name: row.name,
                    username: row.username,
                    website: row.website.filter(|w| !w.is_empty()),
                    password: row.password,
                });
            }
        }
        ImportFormat::Bitwarden => {
            for row in reader.deserialize() {
                let row: BitwardenRow = row?;
                records.push(PlainRecord {
                    name: row.name,
                    username: row.login_username,
                    website: row.login_uri.filter(|w| !w.is_empty()),
                    password: row.login_password,
                });
            }
        }
    }

    debug!("Parsed {} rows from CSV", records.len());
    Ok(records)
}

/// Write records to a CSV file with the standard columns
/// `id,name,username,password,website,created_at`
///
/// The caller supplies records whose `password` field has already been
/// decrypted; this function just serializes.
pub fn export_records<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!("Exported {} records to CSV", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_standard_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("standard.csv");
        std::fs::write(
            &path,
            "id,name,username,password,website,created_at\n\
             1,github,alice,swordfish,https://github.com,2024-01-01\n\
             2,mail,bob,hunter2,,2024-01-02\n",
        )
        .unwrap();

        let records = read_records(&path, ImportFormat::Standard).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            PlainRecord {
                name: "github".to_string(),
                username: "alice".to_string(),
                website: Some("https://github.com".to_string()),
                password: "swordfish".to_string(),
            }
        );
        // Empty website column maps to None
        assert_eq!(records[1].website, None);
    }

    #[test]
    fn test_read_bitwarden_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bitwarden.csv");
        std::fs::write(
            &path,
            "folder,favorite,type,name,notes,fields,reprompt,login_uri,login_username,login_password,login_otp\n\
             ,,login,github,,,0,https://github.com,alice,swordfish,\n",
        )
        .unwrap();

        let records = read_records(&path, ImportFormat::Bitwarden).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            PlainRecord {
                name: "github".to_string(),
                username: "alice".to_string(),
                website: Some("https://github.com".to_string()),
                password: "swordfish".to_string(),
            }
        );
    }

    #[test]
    fn test_export_then_reimport() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("export.csv");

        let records = vec![Record {
            id: 1,
            name: "github".to_string(),
            username: "alice".to_string(),
            password: "swordfish".to_string(),
            website: Some("https://github.com".to_string()),
            created_at: "2024-01-01 00:00:00".to_string(),
        }];

        export_records(&path, &records).unwrap();

        let reimported = read_records(&path, ImportFormat::Standard).unwrap();
        assert_eq!(reimported.len(), 1);
        assert_eq!(reimported[0].name, "github");
        assert_eq!(reimported[0].password, "swordfish");
        assert_eq!(
            reimported[0].website.as_deref(),
            Some("https://github.com")
        );
    }
}
