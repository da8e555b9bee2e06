//! Configuration file support and option clamping.
//!
//! Ordgraf reads an optional `ordgraf.toml` next to the working
//! directory; every field has a default, so a missing file or a
//! partial file both work. Out-of-range numeric values are clamped to
//! the conventional ranges rather than rejected, since a slightly odd
//! config should not block an exploration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clustering::ClusterAlgorithm;
use crate::graph::BuildOptions;
use crate::lookup::http::DEFAULT_BASE_URL;
use crate::normalize::NormalizationMode;

pub const DEFAULT_CONFIG_FILE: &str = "ordgraf.toml";

/// Conventional bounds for the build options.
pub const DEPTH_RANGE: (u32, u32) = (1, 2);
pub const MAX_NEIGHBORS_RANGE: (usize, usize) = (1, 10);

/// User-facing configuration with per-field defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdgrafConfig {
    /// Expansion depth (clamped to [1, 2])
    #[serde(default = "default_depth")]
    pub depth: u32,

    /// Neighbors admitted per expanded word (clamped to [1, 10])
    #[serde(default = "default_max_neighbors")]
    pub max_neighbors: usize,

    /// Minimum similarity score (clamped to [0, 1])
    #[serde(default)]
    pub threshold: f64,

    /// Similarity collection to query
    #[serde(default = "default_model")]
    pub model: String,

    /// Word-identity normalization mode
    #[serde(default)]
    pub normalization: NormalizationMode,

    /// Clustering algorithm
    #[serde(default)]
    pub algorithm: ClusterAlgorithm,

    /// Whispers label-propagation passes
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Seed for the whispers visitation shuffle
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,

    /// Base URL of the similarity API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_depth() -> u32 {
    1
}

fn default_max_neighbors() -> usize {
    10
}

fn default_model() -> String {
    "vss_1850_cos".to_string()
}

fn default_iterations() -> usize {
    crate::clustering::whispers::DEFAULT_ITERATIONS
}

fn default_rng_seed() -> u64 {
    42
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for OrdgrafConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            max_neighbors: default_max_neighbors(),
            threshold: 0.0,
            model: default_model(),
            normalization: NormalizationMode::default(),
            algorithm: ClusterAlgorithm::default(),
            iterations: default_iterations(),
            rng_seed: default_rng_seed(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl OrdgrafConfig {
    /// Load from a toml file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("invalid config {}: {}", path.display(), e))
    }

    /// Produce build options with all numeric fields clamped.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            depth: clamp_depth(self.depth),
            max_neighbors: clamp_max_neighbors(self.max_neighbors),
            threshold: clamp_threshold(self.threshold),
            model: self.model.clone(),
            normalization: self.normalization,
        }
    }
}

pub fn clamp_depth(depth: u32) -> u32 {
    depth.clamp(DEPTH_RANGE.0, DEPTH_RANGE.1)
}

pub fn clamp_max_neighbors(max_neighbors: usize) -> usize {
    max_neighbors.clamp(MAX_NEIGHBORS_RANGE.0, MAX_NEIGHBORS_RANGE.1)
}

pub fn clamp_threshold(threshold: f64) -> f64 {
    threshold.clamp(0.0, 1.0)
}

/// Default config rendered with comments, written by `ordgraf init`.
pub fn default_config_template() -> String {
    format!(
        r#"# ordgraf configuration
# Expansion depth from the seed word (1 or 2)
depth = {depth}
# Neighbors admitted per expanded word (1 to 10)
max_neighbors = {max_neighbors}
# Minimum similarity score a neighbor must reach (0.0 to 1.0)
threshold = 0.0
# Similarity collection: "vss_1850_cos" (1800s corpus) or a 1900s collection
model = "{model}"
# Word identity: "normalized" (lowercased) or "case-sensitive"
normalization = "normalized"
# Clustering algorithm: "whispers" or "louvain"
algorithm = "whispers"
# Whispers label-propagation passes
iterations = {iterations}
# Seed for the whispers visitation shuffle
rng_seed = {rng_seed}
# Similarity API endpoint
base_url = "{base_url}"
timeout_ms = {timeout_ms}
"#,
        depth = default_depth(),
        max_neighbors = default_max_neighbors(),
        model = default_model(),
        iterations = default_iterations(),
        rng_seed = default_rng_seed(),
        base_url = default_base_url(),
        timeout_ms = default_timeout_ms(),
    )
}
