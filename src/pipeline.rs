//! Catalog sourcing pipeline
//!
//! Declares the link schema, loads the catalog (cache or network), normalizes
//! it and hands the nodes to a [`NodeStore`]. A catalog that fails to
//! normalize is not an error for the caller: the failure is logged, the cache
//! slot is cleared so the next run refetches, and the report says what went
//! wrong. Only a failed fetch is returned as an error.

use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use crate::cache::{CacheGateway, CacheKey, CacheStore};
use crate::catalog::{CatalogSource, FetchError, NodeType};
use crate::graph::{normalize, NodeStore, NormalizationError, LINKS};
use crate::refresh::{load_catalog, CatalogOrigin};

/// Errors that abort a sourcing run
#[derive(Debug, Error)]
pub enum SourceError {
    /// The catalog could not be fetched
    #[error("Failed to fetch catalog: {0}")]
    Fetch(#[from] FetchError),
}

/// Settings for one sourcing run
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    pub cache_key: CacheKey,
    /// Reuse a cached catalog when one is present
    pub cache_response: bool,
}

/// What normalization produced
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeOutcome {
    /// Nodes were emitted; records per node type, collisions included
    Created(BTreeMap<NodeType, usize>),
    /// Nothing was emitted and the cache slot was cleared
    Failed(NormalizationError),
}

/// Summary of a sourcing run
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    pub origin: CatalogOrigin,
    pub outcome: NormalizeOutcome,
    /// Ids emitted more than once, one entry per repeat; the store keeps one node each
    pub duplicate_ids: Vec<String>,
}

impl SourceReport {
    /// Number of distinct nodes emitted
    pub fn node_count(&self) -> usize {
        match &self.outcome {
            NormalizeOutcome::Created(counts) => {
                counts.values().sum::<usize>() - self.duplicate_ids.len()
            }
            NormalizeOutcome::Failed(_) => 0,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, NormalizeOutcome::Created(_))
    }
}

/// Runs one sourcing pass into `nodes`
pub async fn source_nodes<S, C, N>(
    config: &SourceConfig,
    cache: &S,
    source: &C,
    nodes: &mut N,
) -> Result<SourceReport, SourceError>
where
    S: CacheStore + ?Sized,
    C: CatalogSource + ?Sized,
    N: NodeStore + ?Sized,
{
    nodes.declare_schema(&LINKS);

    let gateway = CacheGateway::new(cache, &config.cache_key);
    let loaded = load_catalog(&gateway, source, config.cache_response).await?;

    let mut duplicate_ids = Vec::new();
    let outcome = match normalize(&loaded.document) {
        Ok(normalized) => {
            let mut counts: BTreeMap<NodeType, usize> =
                NodeType::ALL.iter().map(|t| (*t, 0)).collect();
            let mut seen = HashSet::new();
            for node in normalized {
                *counts.entry(node.node_type).or_default() += 1;
                if !seen.insert(node.id.clone()) {
                    tracing::warn!(id = %node.id, node_type = %node.node_type, "duplicate node id");
                    duplicate_ids.push(node.id.clone());
                }
                nodes.create_node(node);
            }
            tracing::info!(
                origin = ?loaded.origin,
                nodes = seen.len(),
                duplicates = duplicate_ids.len(),
                "catalog sourced"
            );
            NormalizeOutcome::Created(counts)
        }
        Err(e) => {
            tracing::error!(key = gateway.key(), error = %e, "failed to normalize catalog, clearing cache");
            if let Err(cache_err) = gateway.invalidate().await {
                tracing::warn!(key = gateway.key(), error = %cache_err, "failed to clear catalog cache");
            }
            NormalizeOutcome::Failed(e)
        }
    };

    Ok(SourceReport {
        origin: loaded.origin,
        outcome,
        duplicate_ids,
    })
}
