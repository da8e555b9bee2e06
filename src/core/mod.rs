//! Shared graph data model.
//!
//! Nodes and edges are plain serde-friendly data; identity and
//! reconciliation rules (canonical edge pairs, max-weight, min-depth)
//! live in small pure helpers so the builder stays thin.
//!
//! # Pure Function Properties
//!
//! All functions in this module are pure:
//! - Deterministic output for same input
//! - No side effects (no I/O, no logging)
//! - Thread-safe

use serde::{Deserialize, Serialize};

/// A word node in the similarity graph.
///
/// `id` is the normalized identity key; `word` keeps the surface form
/// from the first discovery; `depth` is the minimum number of expansion
/// hops from the seed along any path that reached this node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub word: String,
    pub depth: u32,
}

impl Node {
    pub fn new(id: impl Into<String>, word: impl Into<String>, depth: u32) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            depth,
        }
    }
}

/// An undirected weighted edge between two node ids.
///
/// Invariant: `source < target` lexicographically, so (x, y) and (y, x)
/// collide on the same record. Weight is the maximum similarity score
/// observed for the pair across the whole build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Edge {
    /// Create an edge with the canonical pair ordering applied.
    pub fn new(a: impl Into<String>, b: impl Into<String>, weight: f64) -> Self {
        let (source, target) = canonical_pair(a.into(), b.into());
        Self {
            source,
            target,
            weight,
        }
    }
}

/// Order an unordered id pair so both directions map to the same key.
pub fn canonical_pair(a: String, b: String) -> (String, String) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// One ranked result from a similarity lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub word: String,
    pub score: f64,
}

impl Neighbor {
    pub fn new(word: impl Into<String>, score: f64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// The full node and edge sets produced by one build.
///
/// Immutable once returned; nodes and edges keep first-seen insertion
/// order. Safe to share read-only across multiple clustering runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
