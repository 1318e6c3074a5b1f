// src/repositories/memory.rs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use msglog_common::traits::KeyValueStore;
use msglog_common::Error;

/// Map-backed store. Keeps a count of saves so callers can observe write
/// frequency.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    data: Mutex<HashMap<(String, String), Value>>,
    saves: Mutex<usize>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        self.data
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&(namespace.to_string(), key.to_string()))
            .cloned()
    }

    pub fn insert(&self, namespace: &str, key: &str, value: Value) {
        self.data
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert((namespace.to_string(), key.to_string()), value);
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn save(&self, namespace: &str, key: &str, value: &Value) -> Result<(), Error> {
        self.insert(namespace, key, value.clone());
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }

    async fn load(&self, namespace: &str, key: &str) -> Result<Option<Value>, Error> {
        Ok(self.get(namespace, key))
    }
}
