//! Search engine client adapters.
//!
//! The engine itself is an external collaborator; this module defines the
//! seam (the [`SearchClient`] / [`BlockingSearchClient`] traits) and HTTP
//! adapters over it. Transport failures are kept distinguishable from
//! "zero results": a timeout or connection failure surfaces as
//! [`MolseekError::Unavailable`], never as an empty hit list, because the
//! caller's user-facing response differs (service-unavailable vs
//! not-found).

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::error::{MolseekError, Result};
use crate::hit::{Hit, RawHit};
use crate::query::CompiledQuery;

/// Bounded wait for the engine before a call fails distinguishably. No
/// retry is attempted here; retry policy belongs to callers.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Non-blocking search execution seam.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Execute a compiled query, returning candidates in engine rank order
    /// with their highlight excerpts attached.
    async fn execute(&self, query: &CompiledQuery) -> Result<Vec<Hit>>;
}

/// Blocking counterpart of [`SearchClient`]; identical contract, the call
/// blocks instead of suspending.
pub trait BlockingSearchClient {
    fn execute(&self, query: &CompiledQuery) -> Result<Vec<Hit>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<RawHit>,
}

fn classify_transport(err: reqwest::Error, timeout: Duration) -> MolseekError {
    if err.is_timeout() || err.is_connect() {
        MolseekError::unavailable(timeout)
    } else {
        MolseekError::engine(err.to_string())
    }
}

fn search_endpoint(base_url: &str, index: &str) -> String {
    format!("{}/{}/_search", base_url.trim_end_matches('/'), index)
}

/// Async HTTP adapter for an Elasticsearch-compatible engine.
pub struct HttpSearchClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpSearchClient {
    /// Connect to `base_url` and search the given index with the default
    /// 5 second timeout.
    pub fn new(base_url: &str, index: &str) -> Result<Self> {
        Self::with_timeout(base_url, index, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, index: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| MolseekError::engine(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            endpoint: search_endpoint(base_url, index),
            timeout,
        })
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn execute(&self, query: &CompiledQuery) -> Result<Vec<Hit>> {
        debug!("POST {} (size={})", self.endpoint, query.size);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&query.body())
            .send()
            .await
            .map_err(|err| classify_transport(err, self.timeout))?
            .error_for_status()
            .map_err(|err| MolseekError::engine(err.to_string()))?;

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|err| MolseekError::response(err.to_string()))?;

        Ok(parsed.hits.hits.into_iter().map(Hit::from_raw).collect())
    }
}

/// Blocking HTTP adapter; same endpoint, timeout and error mapping as
/// [`HttpSearchClient`].
pub struct BlockingHttpSearchClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    timeout: Duration,
}

impl BlockingHttpSearchClient {
    pub fn new(base_url: &str, index: &str) -> Result<Self> {
        Self::with_timeout(base_url, index, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, index: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| MolseekError::engine(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            endpoint: search_endpoint(base_url, index),
            timeout,
        })
    }
}

impl BlockingSearchClient for BlockingHttpSearchClient {
    fn execute(&self, query: &CompiledQuery) -> Result<Vec<Hit>> {
        debug!("POST {} (size={})", self.endpoint, query.size);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&query.body())
            .send()
            .map_err(|err| classify_transport(err, self.timeout))?
            .error_for_status()
            .map_err(|err| MolseekError::engine(err.to_string()))?;

        let parsed: SearchResponse = response
            .json()
            .map_err(|err| MolseekError::response(err.to_string()))?;

        Ok(parsed.hits.hits.into_iter().map(Hit::from_raw).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_formatting() {
        assert_eq!(
            search_endpoint("http://localhost:9200/", "compounds"),
            "http://localhost:9200/compounds/_search"
        );
        assert_eq!(
            search_endpoint("http://localhost:9200", "compounds"),
            "http://localhost:9200/compounds/_search"
        );
    }

    #[test]
    fn test_response_envelope_deserializes() {
        let raw = serde_json::json!({
            "took": 4,
            "hits": {
                "total": { "value": 1 },
                "hits": [ {
                    "_id": "42",
                    "_score": 7.1,
                    "_source": { "title": "chloromethane", "rank_hint": 42.0 },
                    "highlight": { "title": ["<em>chloromethane</em>"] }
                } ]
            }
        });
        let parsed: SearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.hits.hits.len(), 1);
        let hit = Hit::from_raw(parsed.hits.hits.into_iter().next().unwrap());
        assert_eq!(hit.record.title.as_deref(), Some("chloromethane"));
        assert_eq!(hit.score, Some(7.1));
        assert_eq!(hit.highlights, vec!["<em>chloromethane</em>"]);
    }
}
