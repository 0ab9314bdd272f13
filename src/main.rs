//! learncat - Source the Microsoft Learn catalog into a linked node graph
//!
//! Runs one sourcing pass: reuse or fetch the catalog, normalize it into
//! nodes, print a per-type summary and optionally write the node records.

use std::fs;

use clap::Parser;

use learncat::cache::{CacheManager, CacheStore, MemoryCache};
use learncat::catalog::LearnClient;
use learncat::cli::Cli;
use learncat::graph::{MemoryNodeStore, LINKS};
use learncat::logging;
use learncat::pipeline::{source_nodes, NormalizeOutcome, SourceConfig};

/// Picks the persisted cache, falling back to an in-memory one
fn open_cache(cli: &Cli) -> Box<dyn CacheStore> {
    match cli.cache_dir.clone().map(CacheManager::with_dir).or_else(CacheManager::new) {
        Some(manager) => {
            tracing::debug!(dir = %manager.dir().display(), "using persisted cache");
            Box::new(manager)
        }
        None => {
            tracing::warn!("no cache directory available, cache lasts for this run only");
            Box::new(MemoryCache::new())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    if cli.schema {
        println!("{}", serde_json::to_string_pretty(&LINKS[..])?);
        return Ok(());
    }

    let config = SourceConfig::from_cli(&cli)?;
    let cache = open_cache(&cli);
    let client = LearnClient::new()
        .with_endpoint(cli.endpoint.as_str())
        .with_locale(config.cache_key.locale.as_str());
    let mut store = MemoryNodeStore::new();

    let report = source_nodes(&config, cache.as_ref(), &client, &mut store).await?;

    match &report.outcome {
        NormalizeOutcome::Created(counts) => {
            println!("Sourced {} nodes ({:?})", report.node_count(), report.origin);
            for (node_type, count) in counts {
                println!("  {:<14} {}", node_type.type_name(), count);
            }
            if !report.duplicate_ids.is_empty() {
                println!(
                    "  {} records shared an id with an earlier record and replaced it",
                    report.duplicate_ids.len()
                );
            }
        }
        NormalizeOutcome::Failed(e) => {
            println!("No nodes sourced: {}", e);
            println!("The cache was cleared; the next run will refetch the catalog.");
        }
    }

    if let Some(path) = &cli.output {
        let records: Vec<_> = store.nodes().map(|node| node.to_record()).collect();
        fs::write(path, serde_json::to_string_pretty(&records)?)?;
        println!("Wrote {} records to {}", records.len(), path.display());
    }

    Ok(())
}
