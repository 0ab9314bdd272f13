//! Cache module for keeping the fetched catalog between runs
//!
//! The pipeline only ever talks to a [`CacheStore`], a string-keyed store of
//! JSON values. Two stores ship with the crate: [`CacheManager`] persists
//! entries to disk, [`MemoryCache`] keeps them for the lifetime of the process.
//! [`CacheGateway`] binds a store to the catalog's cache key and hides the
//! difference between an absent entry and an explicit null.

mod gateway;
mod manager;
mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use gateway::{CacheGateway, CacheKey, DEFAULT_LOCALE, DEFAULT_NAMESPACE};
pub use manager::CacheManager;
pub use memory::MemoryCache;

/// Errors that can occur when reading or writing cache entries
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem access failed
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Entry could not be serialized
    #[error("Failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key cannot be used as a single file name
    #[error("Invalid cache key '{0}': must be a plain file name")]
    InvalidKey(String),
}

/// A generic string-keyed store of JSON values
///
/// Storing `None` writes an explicit null. Callers must treat a null entry
/// exactly like a missing one.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Stores `value` under `key`, replacing any previous entry
    async fn set(&self, key: &str, value: Option<Value>) -> Result<(), CacheError>;
}
