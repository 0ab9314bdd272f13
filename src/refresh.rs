//! Cache-or-fetch decision for the catalog
//!
//! A cached catalog is only reused when the caller opted in and the slot holds
//! a usable document. Otherwise the slot is cleared before the fetch starts, so
//! a run that dies mid-fetch leaves an empty slot behind rather than a stale one.

use crate::cache::{CacheGateway, CacheStore};
use crate::catalog::{CatalogDocument, CatalogSource, FetchError};

/// Ignore the cache regardless of configuration
pub const FORCE_CLEAR_CACHE: bool = false;

/// Where a loaded catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Cache,
    Network,
}

/// A catalog ready for normalization
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub document: CatalogDocument,
    pub origin: CatalogOrigin,
}

/// Whether a cached catalog may be used instead of fetching
pub fn use_cached(cached: Option<&CatalogDocument>, cache_response: bool, force_clear: bool) -> bool {
    cached.is_some() && cache_response && !force_clear
}

/// Loads the catalog from cache when allowed, otherwise fetches and stores it
///
/// Cache read and write failures are logged and treated like a miss; only a
/// failed fetch is returned as an error.
pub async fn load_catalog<S, C>(
    gateway: &CacheGateway<'_, S>,
    source: &C,
    cache_response: bool,
) -> Result<LoadedCatalog, FetchError>
where
    S: CacheStore + ?Sized,
    C: CatalogSource + ?Sized,
{
    let cached = match gateway.get_catalog().await {
        Ok(cached) => cached,
        Err(e) => {
            tracing::warn!(key = gateway.key(), error = %e, "failed to read catalog cache");
            None
        }
    };

    if use_cached(cached.as_ref(), cache_response, FORCE_CLEAR_CACHE) {
        if let Some(document) = cached {
            tracing::debug!(key = gateway.key(), "using cached catalog");
            return Ok(LoadedCatalog {
                document,
                origin: CatalogOrigin::Cache,
            });
        }
    }

    tracing::debug!(key = gateway.key(), cache_response, "cache not used, refetching");
    if let Err(e) = gateway.invalidate().await {
        tracing::warn!(key = gateway.key(), error = %e, "failed to clear catalog cache");
    }

    let document = source.fetch().await?;

    if let Err(e) = gateway.store(&document).await {
        tracing::warn!(key = gateway.key(), error = %e, "failed to store catalog in cache");
    }

    Ok(LoadedCatalog {
        document,
        origin: CatalogOrigin::Network,
    })
}
