//! Durable key-value store
//!
//! SQLite-backed primary copy of the session record.

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::store::{SessionStore, StoreOptions};
use crate::Result;

pub struct KvStore {
    conn: Arc<Mutex<Connection>>,
}

impl KvStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })?;

        Ok(())
    }
}

impl SessionStore for KvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        KvStore::get(self, key)
    }

    fn set(&self, key: &str, value: &str, _options: &StoreOptions) -> Result<()> {
        KvStore::set(self, key, value)
    }
}

impl Clone for KvStore {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let store = KvStore::open_in_memory().unwrap();
        assert_eq!(store.get("luxe_sessionId").unwrap(), None);

        store.set("luxe_sessionId", "abc123").unwrap();
        assert_eq!(
            store.get("luxe_sessionId").unwrap(),
            Some("abc123".to_string())
        );

        // Overwrite wins
        store.set("luxe_sessionId", "def456").unwrap();
        assert_eq!(
            store.get("luxe_sessionId").unwrap(),
            Some("def456".to_string())
        );
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("luxe.db");

        {
            let store = KvStore::open(&path).unwrap();
            store.set("luxe_sessionId", "abc123").unwrap();
        }

        let store = KvStore::open(&path).unwrap();
        assert_eq!(
            store.get("luxe_sessionId").unwrap(),
            Some("abc123".to_string())
        );
    }
}
