//! SQLite-backed document storage.
//!
//! Each collection is a row in a single `kv` table holding the JSON text.

use std::path::Path;

use rusqlite::{params, Connection};

use super::KvBackend;
use crate::error::StoreError;

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (or create) the database file and ensure the schema exists.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvBackend for SqliteBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let mut db = SqliteBackend::open_memory().unwrap();
        assert!(db.read("test").unwrap().is_none());
        db.write("test", "hello").unwrap();
        assert_eq!(db.read("test").unwrap().as_deref(), Some("hello"));
        db.write("test", "world").unwrap();
        assert_eq!(db.read("test").unwrap().as_deref(), Some("world"));
    }

    #[test]
    fn reopen_keeps_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focusflow.db");
        {
            let mut db = SqliteBackend::open(&path).unwrap();
            db.write("focusflow_sessions", "[]").unwrap();
        }
        let db = SqliteBackend::open(&path).unwrap();
        assert_eq!(db.read("focusflow_sessions").unwrap().as_deref(), Some("[]"));
    }
}
