//! Typed access to the catalog's cache slot

use serde_json::Value;
use std::fmt;

use super::{CacheError, CacheStore};
use crate::catalog::CatalogDocument;

/// Default namespace prefix for the catalog cache key
pub const DEFAULT_NAMESPACE: &str = "learncat";

/// Default locale for catalog requests and the cache key
pub const DEFAULT_LOCALE: &str = "en-us";

/// Identifies the catalog's cache slot, rendered as `<namespace>-<locale>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub namespace: String,
    pub locale: String,
}

impl CacheKey {
    pub fn new(namespace: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            locale: locale.into(),
        }
    }
}

impl Default for CacheKey {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE, DEFAULT_LOCALE)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.namespace, self.locale)
    }
}

/// Binds a [`CacheStore`] to the catalog's cache key
///
/// An absent entry, an explicit null and a value that is not a JSON object all
/// read back as `None`, so clearing the slot is just storing null.
pub struct CacheGateway<'a, S: CacheStore + ?Sized> {
    store: &'a S,
    key: String,
}

impl<'a, S: CacheStore + ?Sized> CacheGateway<'a, S> {
    pub fn new(store: &'a S, key: &CacheKey) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// The rendered cache key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the cached catalog, if there is a usable one
    pub async fn get_catalog(&self) -> Result<Option<CatalogDocument>, CacheError> {
        match self.store.get(&self.key).await? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => match serde_json::from_value(value) {
                Ok(doc) => Ok(Some(doc)),
                Err(e) => {
                    tracing::debug!(key = %self.key, error = %e, "ignoring unusable cache entry");
                    Ok(None)
                }
            },
        }
    }

    /// Stores a freshly fetched catalog
    pub async fn store(&self, doc: &CatalogDocument) -> Result<(), CacheError> {
        let value = serde_json::to_value(doc)?;
        self.store.set(&self.key, Some(value)).await
    }

    /// Clears the slot so the next run has to refetch
    pub async fn invalidate(&self) -> Result<(), CacheError> {
        self.store.set(&self.key, None).await
    }
}
