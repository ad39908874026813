//! SerpAPI client for supplementary web context.
//!
//! One Google search per query, reduced to the first organic result's
//! snippet. Every call is bounded by the configured timeout so a slow
//! search provider cannot hang an answer request.

use serpapi_search_rust::serp_api_search::SerpApiSearch;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SearchConfig;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search timed out")]
    Timeout,

    #[error("search request failed: {0}")]
    RequestFailed(String),
}

#[derive(Debug, Clone)]
pub struct WebSearchClient {
    api_key: String,
    timeout: Duration,
}

impl WebSearchClient {
    /// Build a client from configuration; `None` when no key is set, which
    /// callers treat as "web search unavailable" rather than an error.
    pub fn from_config(config: &SearchConfig) -> Option<Self> {
        if config.serpapi_key.is_empty() {
            return None;
        }

        Some(Self {
            api_key: config.serpapi_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Fetch the first organic result's snippet for `query`.
    ///
    /// Returns an empty string when the search succeeds but has no organic
    /// results.
    pub async fn first_snippet(&self, query: &str) -> Result<String, SearchError> {
        info!(query = %query, "Searching the web via SerpAPI");

        let mut params = HashMap::<String, String>::new();
        params.insert("engine".to_string(), "google".to_string());
        params.insert("q".to_string(), query.to_string());

        let search = SerpApiSearch::google(params, self.api_key.clone());

        let results = tokio::time::timeout(self.timeout, search.json())
            .await
            .map_err(|_| SearchError::Timeout)?
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let snippet = results
            .get("organic_results")
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .and_then(|first| first.get("snippet"))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        debug!(snippet_len = snippet.len(), "Web search completed");
        Ok(snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_yields_no_client() {
        let config = SearchConfig {
            serpapi_key: String::new(),
            timeout_secs: 15,
        };
        assert!(WebSearchClient::from_config(&config).is_none());
    }

    #[test]
    fn configured_key_yields_client() {
        let config = SearchConfig {
            serpapi_key: "key".to_string(),
            timeout_secs: 15,
        };
        assert!(WebSearchClient::from_config(&config).is_some());
    }
}
