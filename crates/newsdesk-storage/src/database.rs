//! SQLite-backed key-value store

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::store::KeyValueStore;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL keeps readers unblocked while the session is rewritten
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

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

fn upsert(conn: &Connection, key: &str, value: &str, updated_at: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![key, value, updated_at],
    )?;
    Ok(())
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| upsert(conn, key, value, &updated_at))
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
            Ok(())
        })
    }

    fn put_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.transaction(|conn| {
            for (key, value) in entries {
                upsert(conn, key, value, &updated_at)?;
            }
            Ok(())
        })
    }

    fn delete_all(&self, keys: &[&str]) -> Result<()> {
        self.transaction(|conn| {
            for key in keys {
                conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
            }
            Ok(())
        })
    }
}

impl Clone for Database {
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
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 = conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_put_get_delete() {
        let db = Database::open_in_memory().unwrap();

        db.put("token", "t1").unwrap();
        assert_eq!(db.get("token").unwrap().as_deref(), Some("t1"));

        db.put("token", "t2").unwrap();
        assert_eq!(db.get("token").unwrap().as_deref(), Some("t2"));

        db.delete("token").unwrap();
        assert_eq!(db.get("token").unwrap(), None);

        // Deleting a missing key is fine
        db.delete("token").unwrap();
    }

    #[test]
    fn test_put_all_is_atomic() {
        let db = Database::open_in_memory().unwrap();
        db.put_all(&[("user", "{\"id\":1}"), ("token", "t1")])
            .unwrap();
        assert_eq!(db.get("user").unwrap().as_deref(), Some("{\"id\":1}"));
        assert_eq!(db.get("token").unwrap().as_deref(), Some("t1"));

        // Second insert of the batch fails, so the first must roll back
        db.with_connection(|conn| {
            conn.execute_batch(
                "CREATE TRIGGER reject_token BEFORE INSERT ON kv
                 WHEN NEW.key = 'token'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )?;
            Ok(())
        })
        .unwrap();

        assert!(db.put_all(&[("user", "{\"id\":2}"), ("token", "t2")]).is_err());
        assert_eq!(db.get("user").unwrap().as_deref(), Some("{\"id\":1}"));
        assert_eq!(db.get("token").unwrap().as_deref(), Some("t1"));
    }

    #[test]
    fn test_delete_all() {
        let db = Database::open_in_memory().unwrap();
        db.put_all(&[("user", "{}"), ("token", "t1"), ("other", "x")])
            .unwrap();

        db.delete_all(&["user", "token"]).unwrap();
        assert_eq!(db.get("user").unwrap(), None);
        assert_eq!(db.get("token").unwrap(), None);
        assert_eq!(db.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_reopen_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("newsdesk.db");

        {
            let db = Database::open(&path).unwrap();
            db.put("token", "persisted").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get("token").unwrap().as_deref(), Some("persisted"));
    }
}
