use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{AppError, Result};

use super::store::Store;

/// Non-durable store. Values are kept serialized so reads go through the
/// same JSON round-trip as the SQLite backend.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("memory store lock poisoned".to_string()))?;
        match entries.get(key) {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("memory store lock poisoned".to_string()))?
            .insert(key.to_string(), text);
        Ok(())
    }
}
