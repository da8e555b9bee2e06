//! Chinese Whispers label propagation.
//!
//! Every node starts as its own cluster; each pass visits all nodes in
//! a freshly shuffled order and lets every node adopt the label with
//! the highest accumulated edge weight among its neighbors. The shuffle
//! is drawn from an explicit seedable RNG so runs are reproducible.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::clustering::{index_graph, rank_partition, Clustering};
use crate::core::Graph;

pub const DEFAULT_ITERATIONS: usize = 12;

/// Partition a graph by randomized label propagation.
///
/// Isolated nodes keep their own id as label forever, so a graph with
/// zero edges yields one singleton cluster per node.
pub fn cluster(graph: &Graph, iterations: usize, rng_seed: u64) -> Clustering {
    let indexed = index_graph(graph);
    let node_count = indexed.ids.len();

    let mut labels: Vec<usize> = (0..node_count).collect();
    let mut order: Vec<usize> = (0..node_count).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);

    for _ in 0..iterations {
        order.shuffle(&mut rng);
        for &node in &order {
            if indexed.adjacency[node].is_empty() {
                continue;
            }
            labels[node] = dominant_label(labels[node], &labels, &indexed.adjacency[node]);
        }
    }

    rank_partition(&indexed.ids, &labels)
}

/// Pick the label with the highest accumulated edge weight.
///
/// Ties keep `current` if it is among the tied leaders, otherwise the
/// label first encountered during accumulation wins.
fn dominant_label(current: usize, labels: &[usize], neighbors: &[(usize, f64)]) -> usize {
    let mut seen_order: Vec<usize> = Vec::new();
    let mut weight_by_label: HashMap<usize, f64> = HashMap::new();

    for &(neighbor, weight) in neighbors {
        let label = labels[neighbor];
        let entry = weight_by_label.entry(label).or_insert_with(|| {
            seen_order.push(label);
            0.0
        });
        *entry += weight;
    }

    let best_weight = weight_by_label
        .values()
        .fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    if weight_by_label.get(&current) == Some(&best_weight) {
        return current;
    }
    seen_order
        .into_iter()
        .find(|label| weight_by_label[label] == best_weight)
        .unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Edge, Node};

    fn graph(node_ids: &[&str], edges: &[(&str, &str, f64)]) -> Graph {
        Graph {
            nodes: node_ids.iter().map(|id| Node::new(*id, *id, 1)).collect(),
            edges: edges
                .iter()
                .map(|(a, b, w)| Edge::new(*a, *b, *w))
                .collect(),
        }
    }

    #[test]
    fn test_edgeless_graph_yields_singletons() {
        let g = graph(&["a", "b", "c"], &[]);
        let clustering = cluster(&g, DEFAULT_ITERATIONS, 1);

        assert_eq!(clustering.clusters.len(), 3);
        assert!(clustering.clusters.iter().all(|c| c.size == 1));
    }

    #[test]
    fn test_two_dense_communities_separate() {
        // two triangles joined by one weak bridge
        let g = graph(
            &["a", "b", "c", "x", "y", "z"],
            &[
                ("a", "b", 0.9),
                ("b", "c", 0.9),
                ("a", "c", 0.9),
                ("x", "y", 0.9),
                ("y", "z", 0.9),
                ("x", "z", 0.9),
                ("c", "x", 0.1),
            ],
        );
        let clustering = cluster(&g, DEFAULT_ITERATIONS, 7);

        assert_eq!(clustering.clusters.len(), 2);
        assert_eq!(clustering.cluster_by_node["a"], clustering.cluster_by_node["c"]);
        assert_eq!(clustering.cluster_by_node["x"], clustering.cluster_by_node["z"]);
        assert_ne!(clustering.cluster_by_node["a"], clustering.cluster_by_node["x"]);
    }

    #[test]
    fn test_same_seed_same_partition() {
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b", 0.8), ("c", "d", 0.7), ("b", "c", 0.2)],
        );
        let first = cluster(&g, DEFAULT_ITERATIONS, 99);
        let second = cluster(&g, DEFAULT_ITERATIONS, 99);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cluster_map_is_total() {
        let g = graph(&["a", "b", "c", "d"], &[("a", "b", 0.9)]);
        let clustering = cluster(&g, DEFAULT_ITERATIONS, 3);

        for node in &g.nodes {
            assert!(clustering.cluster_by_node.contains_key(&node.id));
        }
    }

    #[test]
    fn test_dominant_label_prefers_heaviest() {
        // node 0 with neighbors 1 (label 5) and 2 (label 6)
        let labels = vec![0, 5, 6];
        let picked = dominant_label(0, &labels, &[(1, 0.3), (2, 0.7)]);
        assert_eq!(picked, 6);
    }

    #[test]
    fn test_dominant_label_tie_keeps_current() {
        let labels = vec![5, 5, 6];
        let picked = dominant_label(5, &labels, &[(1, 0.5), (2, 0.5)]);
        assert_eq!(picked, 5);
    }

    #[test]
    fn test_dominant_label_tie_falls_back_to_first_seen() {
        let labels = vec![0, 5, 6];
        let picked = dominant_label(0, &labels, &[(1, 0.5), (2, 0.5)]);
        assert_eq!(picked, 5);
    }
}
