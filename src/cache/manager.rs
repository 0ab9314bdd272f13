//! Cache manager for persisting catalog responses to disk
//!
//! Provides a `CacheManager` that stores JSON values to files, one file per
//! cache key, together with the time the entry was written.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::{CacheError, CacheStore};

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// The cached value, `null` when the slot was cleared
    data: Option<Value>,
    /// When the entry was written
    cached_at: DateTime<Utc>,
}

/// Persists cache entries as JSON files
///
/// The cache manager stores data in an XDG-compliant cache directory
/// (`~/.cache/learncat/` on Linux). Entries never expire on their own; an
/// entry is only replaced or cleared by the caller.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "learncat")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory the cache files live in
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to a cache file for the given key
    ///
    /// Keys must name a single file inside the cache directory.
    fn cache_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\', ':']) {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.cache_dir.join(format!("{}.json", key)))
    }

    /// Writes a value to the cache, creating the directory if needed
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g., "learncat-en-us")
    /// * `data` - The value to cache, or `None` to clear the slot
    pub fn write(&self, key: &str, data: Option<&Value>) -> Result<(), CacheError> {
        let path = self.cache_path(key)?;
        fs::create_dir_all(&self.cache_dir)?;

        let entry = CacheEntry {
            data: data.cloned(),
            cached_at: Utc::now(),
        };
        let json = serde_json::to_string(&entry)?;

        fs::write(path, json)?;
        Ok(())
    }

    /// Reads a value from the cache
    ///
    /// Returns `None` if the key is invalid, or the entry doesn't exist, cannot
    /// be parsed, or holds null.
    pub fn read(&self, key: &str) -> Option<Value> {
        let content = fs::read_to_string(self.cache_path(key).ok()?).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;

        tracing::trace!(key, cached_at = %entry.cached_at, "read cache entry");
        entry.data
    }
}

#[async_trait]
impl CacheStore for CacheManager {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.read(key))
    }

    async fn set(&self, key: &str, value: Option<Value>) -> Result<(), CacheError> {
        self.write(key, value.as_ref())
    }
}
