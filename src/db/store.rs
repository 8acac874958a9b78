use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

pub const ARTICLES_KEY: &str = "bongo_news_db";
pub const BOOKMARKS_KEY: &str = "bongo_news_bookmarks";
pub const LIKED_KEY: &str = "bongo_news_likes";

/// Durable key to JSON value storage.
///
/// Each `set` is durable on return; there is no atomicity across keys.
/// A missing key is `Ok(None)`, not an error.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: &Value) -> Result<()>;
}

pub fn load<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub fn save<T: Serialize + ?Sized>(store: &dyn Store, key: &str, value: &T) -> Result<()> {
    let value = serde_json::to_value(value)?;
    store.set(key, &value)
}

/// Reads a list of ids, treating a missing or unreadable record as empty.
pub(crate) fn load_id_set(store: &dyn Store, key: &str) -> Vec<String> {
    match load::<Vec<String>>(store, key) {
        Ok(ids) => ids.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            Vec::new()
        }
    }
}

pub(crate) fn save_id_set(store: &dyn Store, key: &str, ids: &[String]) {
    if let Err(e) = save(store, key, ids) {
        tracing::warn!("Failed to write {}: {}", key, e);
    }
}
