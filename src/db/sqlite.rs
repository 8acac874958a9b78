use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::error::{AppError, Result};

use super::schema::SCHEMA;
use super::store::Store;

/// SQLite-backed store. Every record lives in one `kv_store` row.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| AppError::Storage("connection lock poisoned".to_string()))?;
        f(&conn)
    }
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let raw: Option<String> = self.with_conn(|conn| {
            let raw = conn
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(raw)
        })?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                   ON CONFLICT(key) DO UPDATE SET
                       value = excluded.value,
                       updated_at = datetime('now')"#,
                params![key, text],
            )?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .set("bongo_news_likes", &json!(["1", "2"]))
                .unwrap();
            store.set("flag", &json!({"on": true, "n": 3})).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get("bongo_news_likes").unwrap(),
            Some(json!(["1", "2"]))
        );
        assert_eq!(store.get("flag").unwrap(), Some(json!({"on": true, "n": 3})));
    }

    #[test]
    fn set_overwrites_and_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("news.db")).unwrap();

        assert_eq!(store.get("absent").unwrap(), None);

        store.set("k", &json!("first")).unwrap();
        store.set("k", &json!("second")).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!("second")));
    }
}
