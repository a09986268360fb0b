//! Market Research
//!
//! Real-time news and definitions that are not in the catalog come from an
//! external search backend behind the [`SearchClient`] trait.

mod http;
mod mock;

pub use http::{HttpSearchClient, SearchConfig};
pub use mock::StaticSearchClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Results returned per query
pub const DEFAULT_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// Search backend (Strategy pattern)
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>>;

    /// Backend name
    fn name(&self) -> &str;
}

/// Placeholder used when no backend is configured
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledSearchClient;

#[async_trait]
impl SearchClient for DisabledSearchClient {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchHit>> {
        Err(AdvisorError::DataUnavailable("no search backend configured".into()))
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub source: String,
    pub hits: Vec<SearchHit>,
}

pub struct SearchHandler {
    client: Arc<dyn SearchClient>,
    limit: usize,
}

impl SearchHandler {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            client,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AdvisorError::MissingArgument("query".into()));
        }

        let mut hits = self.client.search(query, self.limit).await?;
        hits.truncate(self.limit);

        Ok(SearchResults {
            query: query.to_string(),
            source: self.client.name().to_string(),
            hits,
        })
    }
}
