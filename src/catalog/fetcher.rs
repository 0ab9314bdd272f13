//! Microsoft Learn catalog API client
//!
//! Fetches the whole catalog in one request. There is no retry: a failed
//! request or an unparseable body is returned to the caller as a [`FetchError`].

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use super::CatalogDocument;
use crate::cache::DEFAULT_LOCALE;

/// Base URL for the Learn catalog API
pub const DEFAULT_ENDPOINT: &str = "https://learn.microsoft.com/api/learn/catalog/";

/// Errors that can occur when fetching the catalog
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or returned an error status
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can produce a full catalog document
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<CatalogDocument, FetchError>;
}

/// Client for the Learn catalog endpoint
#[derive(Debug, Clone)]
pub struct LearnClient {
    client: Client,
    endpoint: String,
    locale: String,
}

impl Default for LearnClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LearnClient {
    /// Create a new LearnClient against the public endpoint
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Create a new LearnClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            ..Self::new()
        }
    }

    /// Point the client at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Request the catalog in a specific locale
    ///
    /// This must be the same locale the cache key is built from.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Parse a response body into a catalog document
    fn parse_catalog(text: &str) -> Result<CatalogDocument, FetchError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[async_trait]
impl CatalogSource for LearnClient {
    async fn fetch(&self) -> Result<CatalogDocument, FetchError> {
        tracing::info!(endpoint = %self.endpoint, locale = %self.locale, "fetching catalog");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("locale", self.locale.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;

        let doc = Self::parse_catalog(&text)?;
        tracing::debug!(collections = doc.len(), bytes = text.len(), "catalog received");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_client_settings() {
        let client = LearnClient::default();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(client.locale(), "en-us");
    }

    #[test]
    fn test_builder_overrides() {
        let client = LearnClient::new()
            .with_endpoint("http://localhost:9/catalog")
            .with_locale("fr-fr");
        assert_eq!(client.endpoint(), "http://localhost:9/catalog");
        assert_eq!(client.locale(), "fr-fr");
    }

    #[test]
    fn test_parse_catalog_valid() {
        let doc = LearnClient::parse_catalog(r#"{"modules":[{"uid":"m1"}],"units":[]}"#).unwrap();
        assert_eq!(doc.collection("modules"), Some(&json!([{ "uid": "m1" }])));
    }

    #[test]
    fn test_parse_catalog_invalid_json() {
        let err = LearnClient::parse_catalog("<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert!(err.to_string().contains("Failed to parse catalog response"));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_endpoint_fails() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let client = LearnClient::new().with_endpoint("http://127.0.0.1:9/catalog");
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
