//! Static Search Client
//!
//! For tests and offline demos. Returns canned hits filtered by query words.

use async_trait::async_trait;

use super::{SearchClient, SearchHit};
use crate::error::Result;

pub struct StaticSearchClient {
    hits: Vec<SearchHit>,
}

impl StaticSearchClient {
    pub fn new(hits: impl IntoIterator<Item = SearchHit>) -> Self {
        Self {
            hits: hits.into_iter().collect(),
        }
    }

    fn relevant(hit: &SearchHit, words: &[String]) -> bool {
        let haystack = format!("{} {}", hit.title, hit.snippet).to_lowercase();
        words.iter().any(|w| haystack.contains(w.as_str()))
    }
}

#[async_trait]
impl SearchClient for StaticSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

        Ok(self
            .hits
            .iter()
            .filter(|hit| Self::relevant(hit, &words))
            .take(limit)
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, snippet: &str) -> SearchHit {
        SearchHit {
            title: title.into(),
            url: "https://example.id".into(),
            snippet: snippet.into(),
        }
    }

    #[tokio::test]
    async fn test_filters_by_query_words() {
        let client = StaticSearchClient::new([
            hit("Suku bunga BI tetap", "Bank Indonesia menahan BI rate"),
            hit("IHSG menguat", "Saham perbankan memimpin"),
        ]);

        let hits = client.search("ihsg", 5).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "IHSG menguat");

        assert!(client.search("obligasi", 5).await.unwrap().is_empty());
    }
}
