//! Process-lifetime cache store

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{CacheError, CacheStore};

/// Keeps cache entries in memory until the process exits
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Option<Value>) -> Result<(), CacheError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.unwrap_or(Value::Null));
        Ok(())
    }
}
