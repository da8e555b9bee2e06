//! Community detection over a similarity graph.
//!
//! Two interchangeable algorithms share one output contract: clusters
//! sorted by descending size, plus a total node-id → rank-index map
//! (0 = largest cluster). A zero-node graph clusters to an empty
//! [`Clustering`] rather than failing.

pub mod louvain;
pub mod whispers;

use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::Graph;

/// Which community-detection algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterAlgorithm {
    /// Randomized Chinese Whispers label propagation
    #[default]
    Whispers,
    /// Multilevel modularity optimization
    Louvain,
}

impl ClusterAlgorithm {
    /// Parse an algorithm name, falling back to whispers for anything
    /// unrecognized.
    pub fn parse_lenient(name: &str) -> Self {
        match name {
            "louvain" => Self::Louvain,
            _ => Self::Whispers,
        }
    }
}

/// Tuning knobs consumed by the algorithms.
#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// Whispers label-propagation passes
    pub iterations: usize,
    /// Seed for the per-pass visitation shuffle
    pub rng_seed: u64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            iterations: whispers::DEFAULT_ITERATIONS,
            rng_seed: 42,
        }
    }
}

/// One community of closely related words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Member node ids in first-seen order
    pub members: Vec<String>,
    pub size: usize,
}

/// A complete partition of a graph's node set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    /// Clusters sorted by non-increasing size
    pub clusters: Vec<Cluster>,
    /// Rank index of each node's cluster; total over the input node set
    pub cluster_by_node: HashMap<String, usize>,
}

/// Run the selected algorithm over a finalized graph.
pub fn cluster(graph: &Graph, algorithm: ClusterAlgorithm, params: &ClusterParams) -> Clustering {
    if graph.is_empty() {
        return Clustering::default();
    }
    match algorithm {
        ClusterAlgorithm::Whispers => whispers::cluster(graph, params.iterations, params.rng_seed),
        ClusterAlgorithm::Louvain => louvain::cluster(graph),
    }
}

/// A graph re-indexed for clustering: node ids in insertion order and
/// an undirected weighted adjacency list (each edge in both directions).
pub(crate) struct IndexedGraph {
    pub ids: Vec<String>,
    pub adjacency: Vec<Vec<(usize, f64)>>,
}

pub(crate) fn index_graph(graph: &Graph) -> IndexedGraph {
    let ids: Vec<String> = graph.nodes.iter().map(|n| n.id.clone()).collect();
    let index: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut adjacency = vec![Vec::new(); ids.len()];
    for edge in &graph.edges {
        let (Some(&a), Some(&b)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        else {
            continue;
        };
        adjacency[a].push((b, edge.weight));
        adjacency[b].push((a, edge.weight));
    }

    IndexedGraph { ids, adjacency }
}

/// Group nodes by final label, sort by descending size, assign ranks.
///
/// Size ties keep first-seen group order (stable sort), so the output
/// is deterministic for a deterministic labeling.
pub(crate) fn rank_partition(ids: &[String], labels: &[usize]) -> Clustering {
    let mut group_order: Vec<usize> = Vec::new();
    let mut group_index: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Vec<String>> = Vec::new();

    for (node, &label) in labels.iter().enumerate() {
        let slot = *group_index.entry(label).or_insert_with(|| {
            group_order.push(label);
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(ids[node].clone());
    }

    let mut clusters: Vec<Cluster> = groups
        .into_iter()
        .map(|members| Cluster {
            size: members.len(),
            members,
        })
        .collect();
    clusters.sort_by(|a, b| b.size.cmp(&a.size));

    let cluster_by_node = clusters
        .iter()
        .enumerate()
        .flat_map(|(rank, cluster)| cluster.members.iter().map(move |id| (id.clone(), rank)))
        .collect();

    Clustering {
        clusters,
        cluster_by_node,
    }
}
