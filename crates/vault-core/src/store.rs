//! SQLite-backed record store
//!
//! Holds already-encrypted envelopes plus plaintext metadata. The store
//! never sees a plaintext secret: the `password` column is always
//! envelope text produced by the encryption service, and an update
//! replaces a record's envelope wholesale.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// One stored credential record. `password` is envelope text, everything
/// else is plaintext metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub password: String,
    pub website: Option<String>,
    pub created_at: String,
}

/// A record about to be inserted (the store assigns id and timestamp)
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub name: String,
    pub username: String,
    pub website: Option<String>,
    /// Envelope text from the encryption service
    pub password: String,
}

/// Record store over a single SQLite database
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (or create) the record database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for tests)
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                username TEXT NOT NULL,
                password TEXT NOT NULL,
                website TEXT,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            );",
        )?;

        Ok(Self { conn })
    }

    /// Fetch all records, ordered by name
    pub fn fetch_all(&self) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, username, password, website, created_at
             FROM records ORDER BY name",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Record {
                id: row.get(0)?,
                name: row.get(1)?,
                username: row.get(2)?,
                password: row.get(3)?,
                website: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }

        debug!("Fetched {} records", records.len());
        Ok(records)
    }

    /// Insert a new record
    pub fn insert(&self, record: &NewRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO records (name, username, website, password)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.name,
                record.username,
                record.website.as_deref().unwrap_or(""),
                record.password
            ],
        )?;

        debug!("Inserted record: {}", record.name);
        Ok(())
    }

    /// Delete a record by id
    pub fn delete(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM records WHERE id = ?1", params![id])?;

        debug!("Deleted record {}", id);
        Ok(())
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(name: &str) -> NewRecord {
        NewRecord {
            name: name.to_string(),
            username: "user".to_string(),
            website: Some("https://example.com".to_string()),
            password: "envelope-text".to_string(),
        }
    }

    #[test]
    fn test_insert_and_fetch_ordered_by_name() {
        let store = RecordStore::open_in_memory().unwrap();

        store.insert(&new_record("zeta")).unwrap();
        store.insert(&new_record("alpha")).unwrap();
        store.insert(&new_record("mike")).unwrap();

        let records = store.fetch_all().unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mike", "zeta"]);

        // Ids are assigned by the store
        assert!(records.iter().all(|r| r.id > 0));
        assert!(records.iter().all(|r| !r.created_at.is_empty()));
    }

    #[test]
    fn test_delete() {
        let store = RecordStore::open_in_memory().unwrap();

        store.insert(&new_record("alpha")).unwrap();
        store.insert(&new_record("beta")).unwrap();

        let records = store.fetch_all().unwrap();
        store.delete(records[0].id).unwrap();

        let remaining = store.fetch_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "beta");
    }

    #[test]
    fn test_count() {
        let store = RecordStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);

        store.insert(&new_record("alpha")).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_website_optional() {
        let store = RecordStore::open_in_memory().unwrap();

        let mut record = new_record("no-site");
        record.website = None;
        store.insert(&record).unwrap();

        let records = store.fetch_all().unwrap();
        // Missing websites are stored as the empty string
        assert_eq!(records[0].website.as_deref(), Some(""));
    }

    #[test]
    fn test_persistence() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("vault.db");

        {
            let store = RecordStore::open(&path).unwrap();
            store.insert(&new_record("alpha")).unwrap();
        }

        let store = RecordStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
