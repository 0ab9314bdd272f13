//! Command-line interface parsing for learncat
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the pipeline's [`SourceConfig`].

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::cache::{CacheKey, DEFAULT_LOCALE, DEFAULT_NAMESPACE};
use crate::catalog::DEFAULT_ENDPOINT;
use crate::pipeline::SourceConfig;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// A required setting was given as an empty string
    #[error("Invalid {0}: value must not be empty")]
    Empty(&'static str),

    /// A cache key part would not form a plain file name
    #[error("Invalid {0}: '{1}' must not contain path separators or '..'")]
    NotAFileName(&'static str, String),
}

/// Trims a cache key part and checks it can be used inside a file name
fn key_part<'a>(name: &'static str, value: &'a str) -> Result<&'a str, CliError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CliError::Empty(name));
    }
    if value.contains(['/', '\\']) || value.contains("..") {
        return Err(CliError::NotAFileName(name, value.to_string()));
    }
    Ok(value)
}

/// learncat - Source the Microsoft Learn catalog into a linked node graph
#[derive(Parser, Debug)]
#[command(name = "learncat")]
#[command(about = "Fetch, cache and normalize the Microsoft Learn catalog")]
#[command(version)]
pub struct Cli {
    /// Reuse the cached catalog when one is available
    #[arg(
        long,
        env = "LEARNCAT_CACHE_RESPONSE",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub cache_response: bool,

    /// Catalog locale, also part of the cache key
    #[arg(long, env = "LEARNCAT_LOCALE", default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Namespace prefix of the cache key
    #[arg(long, env = "LEARNCAT_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Catalog endpoint URL
    #[arg(long, env = "LEARNCAT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Cache directory (defaults to the platform cache dir)
    #[arg(long, env = "LEARNCAT_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Write the emitted node records to this file as a JSON array
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the link schema as JSON and exit
    #[arg(long)]
    pub schema: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short)]
    pub verbose: bool,
}

impl SourceConfig {
    /// Creates a SourceConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(SourceConfig)` with the cache key and cache policy
    /// * `Err(CliError)` if the locale or namespace is empty or not usable in a file name
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let locale = key_part("locale", &cli.locale)?;
        let namespace = key_part("namespace", &cli.namespace)?;

        Ok(SourceConfig {
            cache_key: CacheKey::new(namespace, locale),
            cache_response: cli.cache_response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["learncat"]);
        assert!(!cli.schema);
        assert!(cli.output.is_none());
        assert_eq!(cli.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_cli_parse_overrides() {
        let cli = Cli::parse_from([
            "learncat",
            "--cache-response",
            "--locale",
            "ja-jp",
            "--namespace",
            "mslearn",
            "--output",
            "nodes.json",
        ]);
        assert!(cli.cache_response);
        assert_eq!(cli.locale, "ja-jp");
        assert_eq!(cli.namespace, "mslearn");
        assert_eq!(cli.output, Some(PathBuf::from("nodes.json")));
    }

    #[test]
    fn test_source_config_from_cli() {
        let cli = Cli::parse_from(["learncat", "--cache-response", "--locale", "de-de"]);
        let config = SourceConfig::from_cli(&cli).unwrap();
        assert!(config.cache_response);
        assert_eq!(config.cache_key.to_string(), format!("{}-de-de", cli.namespace));
    }

    #[test]
    fn test_source_config_rejects_empty_locale() {
        let cli = Cli::parse_from(["learncat", "--locale", "  "]);
        let err = SourceConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("locale"));
    }

    #[test]
    fn test_source_config_rejects_path_like_namespace() {
        for namespace in ["/tmp/outside", "team/learn", "..", "a\\b"] {
            let cli = Cli::parse_from(["learncat", "--namespace", namespace]);
            let err = SourceConfig::from_cli(&cli).unwrap_err();
            assert!(
                matches!(err, CliError::NotAFileName("namespace", _)),
                "{} should be rejected, got {:?}",
                namespace,
                err
            );
        }
    }

    #[test]
    fn test_source_config_rejects_path_like_locale() {
        let cli = Cli::parse_from(["learncat", "--locale", "../en-us"]);
        let err = SourceConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("locale"));
    }

    #[test]
    fn test_source_config_rejects_empty_namespace() {
        let cli = Cli::parse_from(["learncat", "--namespace", ""]);
        assert!(SourceConfig::from_cli(&cli).is_err());
    }
}
