//! Blocking HTTP client for the National Library similarity API.
//!
//! Queries `GET {base_url}/sim_words?word=..&limit=..&collection_name=..`
//! and decodes the ranked neighbor list. The service returns either an
//! array of `[word, score]` pairs or an array of `{word, score}` objects
//! depending on the collection; both shapes are accepted and malformed
//! entries are skipped rather than failing the whole response.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::core::Neighbor;
use crate::errors::LookupError;
use crate::lookup::SimilarityLookup;

pub const DEFAULT_BASE_URL: &str = "https://api.nb.no/dhlab/similarity";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for [`DhlabClient`].
#[derive(Debug, Clone)]
pub struct DhlabConfig {
    /// Base URL for the similarity API
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for DhlabConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// One neighbor entry as the service may encode it on the wire.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNeighbor {
    Pair(String, f64),
    Object { word: String, score: Option<f64> },
}

impl RawNeighbor {
    fn into_neighbor(self) -> Neighbor {
        match self {
            RawNeighbor::Pair(word, score) => Neighbor::new(word, score),
            RawNeighbor::Object { word, score } => Neighbor::new(word, score.unwrap_or(0.0)),
        }
    }
}

/// Blocking client for the dhlab similarity service.
pub struct DhlabClient {
    client: Client,
    config: DhlabConfig,
}

impl DhlabClient {
    pub fn new(config: DhlabConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn with_defaults() -> Result<Self, LookupError> {
        Self::new(DhlabConfig::default())
    }
}

impl SimilarityLookup for DhlabClient {
    fn lookup(&self, word: &str, limit: usize, model: &str) -> Result<Vec<Neighbor>, LookupError> {
        let url = format!("{}/sim_words", self.config.base_url);
        debug!("querying {} for '{}' (limit {})", url, word, limit);

        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("word", word),
                ("limit", limit.as_str()),
                ("collection_name", model),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                word: word.to_string(),
                status,
            });
        }

        let body: serde_json::Value = response.json()?;
        decode_neighbors(word, body)
    }
}

/// Decode a response body into a neighbor list.
///
/// A non-array body is a decode error; array entries that match neither
/// accepted shape are dropped.
fn decode_neighbors(word: &str, body: serde_json::Value) -> Result<Vec<Neighbor>, LookupError> {
    let entries = body.as_array().ok_or_else(|| LookupError::Decode {
        word: word.to_string(),
        message: "expected a JSON array of neighbors".to_string(),
    })?;

    Ok(entries
        .iter()
        .filter_map(|entry| serde_json::from_value::<RawNeighbor>(entry.clone()).ok())
        .map(RawNeighbor::into_neighbor)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_pair_shape() {
        let body = json!([["torsk", 0.9], ["laks", 0.85]]);
        let neighbors = decode_neighbors("fisk", body).unwrap();
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0], Neighbor::new("torsk", 0.9));
    }

    #[test]
    fn test_decode_object_shape() {
        let body = json!([{"word": "torsk", "score": 0.9}, {"word": "laks"}]);
        let neighbors = decode_neighbors("fisk", body).unwrap();
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[1], Neighbor::new("laks", 0.0));
    }

    #[test]
    fn test_decode_skips_malformed_entries() {
        let body = json!([["torsk", 0.9], null, 42, ["lonely"]]);
        let neighbors = decode_neighbors("fisk", body).unwrap();
        assert_eq!(neighbors, vec![Neighbor::new("torsk", 0.9)]);
    }

    #[test]
    fn test_decode_rejects_non_array_body() {
        let err = decode_neighbors("fisk", json!({"detail": "oops"})).unwrap_err();
        assert!(matches!(err, LookupError::Decode { .. }));
    }
}
