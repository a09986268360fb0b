//! HTTP Search Client
//!
//! Calls a JSON search endpoint:
//! `GET {url}?q=<query>&limit=<n>` → `{"results": [{"title", "url", "snippet"}]}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{SearchClient, SearchHit};
use crate::error::{AdvisorError, Result};

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub url: String,

    /// Sent as a bearer token when present
    pub api_key: Option<String>,

    pub timeout_secs: u64,
}

impl SearchConfig {
    /// `None` when `SEARCH_API_URL` is unset or blank
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SEARCH_API_URL").ok().filter(|u| !u.trim().is_empty())?;
        let api_key = std::env::var("SEARCH_API_KEY").ok().filter(|k| !k.trim().is_empty());

        Some(Self {
            url,
            api_key,
            timeout_secs: 15,
        })
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

pub struct HttpSearchClient {
    client: reqwest::Client,
    config: SearchConfig,
}

impl HttpSearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let limit = limit.to_string();
        let mut request = self
            .client
            .get(&self.config.url)
            .query(&[("q", query), ("limit", limit.as_str())]);

        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Search(format!("backend returned {status}")));
        }

        let body: SearchResponse = response.json().await?;
        tracing::debug!(query, hits = body.results.len(), "Search completed");
        Ok(body.results)
    }

    fn name(&self) -> &str {
        "http"
    }
}
