//! HTTP client for the suggestion endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use typeahead_core::config::EndpointConfig;
use typeahead_core::SuggestionSet;

use crate::error::FetchError;
use crate::protocol::{parse_response, AutocompleteRequest};

/// Anything that can turn a query into suggestions.
///
/// Implementations are stateless with respect to ordering: correlating a
/// response with the query that issued it is the caller's job.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<SuggestionSet, FetchError>;
}

/// Client for the remote suggestion endpoint.
pub struct SuggestionClient {
    client: Client,
    endpoint: String,
}

impl SuggestionClient {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, endpoint }
    }

    pub fn from_config(config: &EndpointConfig) -> Self {
        Self::new(config.url.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SuggestionSource for SuggestionClient {
    /// POST `{"q": query}` and normalize the positional response.
    #[instrument(skip(self))]
    async fn fetch(&self, query: &str) -> Result<SuggestionSet, FetchError> {
        let req = AutocompleteRequest::new(query);
        let resp = self.client.post(&self.endpoint).json(&req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;
        let set = parse_response(&req.q, body)?;
        debug!(
            normalized = %set.normalized_query,
            "Received {} suggestions",
            set.len()
        );
        Ok(set)
    }
}
