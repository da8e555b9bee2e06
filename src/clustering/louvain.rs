//! Multilevel modularity optimization (the Louvain method).
//!
//! Repeated local-move phases (each node may hop to the neighboring
//! community with the best modularity gain) followed by aggregation of
//! communities into super-nodes, until neither phase improves anything.
//! Nodes are scanned in index order and candidate communities in
//! adjacency order, so the procedure is deterministic for a given graph.

use std::collections::HashMap;

use crate::clustering::{index_graph, rank_partition, Clustering};
use crate::core::Graph;

const MAX_LEVELS: usize = 16;
const MAX_SWEEPS: usize = 64;
const MIN_GAIN: f64 = 1e-12;

/// Partition a graph by modularity maximization.
pub fn cluster(graph: &Graph) -> Clustering {
    let indexed = index_graph(graph);
    let mut level = LevelGraph::from_adjacency(indexed.adjacency);
    let mut assignment: Vec<usize> = (0..indexed.ids.len()).collect();

    for _ in 0..MAX_LEVELS {
        let (community, improved) = one_level(&level);
        for slot in assignment.iter_mut() {
            *slot = community[*slot];
        }
        if !improved {
            break;
        }
        let aggregated = level.aggregate(&community);
        if aggregated.node_count() == level.node_count() {
            break;
        }
        level = aggregated;
    }

    rank_partition(&indexed.ids, &assignment)
}

/// Modularity of a clustering over the graph that produced it.
///
/// Uses the standard weighted form: Q = Σ_c (e_c/m − (a_c/2m)²), with
/// e_c the internal edge weight of community c, a_c its total incident
/// degree, and m the total edge weight.
pub fn modularity(graph: &Graph, clustering: &Clustering) -> f64 {
    let m: f64 = graph.edges.iter().map(|e| e.weight).sum();
    if m <= 0.0 {
        return 0.0;
    }

    let cluster_count = clustering.clusters.len();
    let mut internal = vec![0.0; cluster_count];
    let mut degree = vec![0.0; cluster_count];

    for edge in &graph.edges {
        let (Some(&ca), Some(&cb)) = (
            clustering.cluster_by_node.get(&edge.source),
            clustering.cluster_by_node.get(&edge.target),
        ) else {
            continue;
        };
        degree[ca] += edge.weight;
        degree[cb] += edge.weight;
        if ca == cb {
            internal[ca] += edge.weight;
        }
    }

    (0..cluster_count)
        .map(|c| internal[c] / m - (degree[c] / (2.0 * m)).powi(2))
        .sum()
}

/// One coarsening level: an undirected weighted multigraph where
/// self-loop weight counts internal edges twice (matching the degree
/// convention of the modularity formula).
struct LevelGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    self_weight: Vec<f64>,
    degree: Vec<f64>,
    /// Sum of all degrees, i.e. 2m
    total: f64,
}

impl LevelGraph {
    fn from_adjacency(adjacency: Vec<Vec<(usize, f64)>>) -> Self {
        let self_weight = vec![0.0; adjacency.len()];
        Self::with_self_weight(adjacency, self_weight)
    }

    fn with_self_weight(adjacency: Vec<Vec<(usize, f64)>>, self_weight: Vec<f64>) -> Self {
        let degree: Vec<f64> = adjacency
            .iter()
            .zip(&self_weight)
            .map(|(neighbors, own)| neighbors.iter().map(|(_, w)| w).sum::<f64>() + own)
            .collect();
        let total = degree.iter().sum();
        Self {
            adjacency,
            self_weight,
            degree,
            total,
        }
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Collapse each community into one super-node, merging parallel
    /// edges and folding internal edges into self-loops.
    fn aggregate(&self, community: &[usize]) -> LevelGraph {
        let count = community.iter().copied().max().map_or(0, |c| c + 1);
        let mut self_weight = vec![0.0; count];
        let mut links: Vec<Vec<(usize, f64)>> = vec![Vec::new(); count];
        let mut link_index: Vec<HashMap<usize, usize>> = vec![HashMap::new(); count];

        for node in 0..self.node_count() {
            self_weight[community[node]] += self.self_weight[node];
        }
        for node in 0..self.node_count() {
            let home = community[node];
            for &(neighbor, weight) in &self.adjacency[node] {
                let other = community[neighbor];
                if other == home {
                    // both endpoints visit the edge, so internal weight
                    // lands doubled, as the self-loop convention requires
                    self_weight[home] += weight;
                } else {
                    match link_index[home].get(&other) {
                        Some(&slot) => links[home][slot].1 += weight,
                        None => {
                            link_index[home].insert(other, links[home].len());
                            links[home].push((other, weight));
                        }
                    }
                }
            }
        }

        LevelGraph::with_self_weight(links, self_weight)
    }
}

/// Local-move phase: sweep nodes until no move improves modularity.
///
/// Returns the densely renumbered community of every node and whether
/// any node moved at all.
fn one_level(graph: &LevelGraph) -> (Vec<usize>, bool) {
    let n = graph.node_count();
    let mut community: Vec<usize> = (0..n).collect();
    let mut community_degree: Vec<f64> = graph.degree.clone();
    let mut moved_any = false;

    if graph.total > 0.0 {
        for _ in 0..MAX_SWEEPS {
            let mut moved = false;
            for node in 0..n {
                if try_move_node(graph, node, &mut community, &mut community_degree) {
                    moved = true;
                    moved_any = true;
                }
            }
            if !moved {
                break;
            }
        }
    }

    (renumber(community), moved_any)
}

/// Evaluate all neighboring communities of `node` and hop to the best
/// strictly positive gain, if any. Returns whether the node moved.
fn try_move_node(
    graph: &LevelGraph,
    node: usize,
    community: &mut [usize],
    community_degree: &mut [f64],
) -> bool {
    let home = community[node];
    let (candidates, weight_to) = neighbor_communities(graph, node, community);

    // evaluate gains with the node lifted out of its community
    community_degree[home] -= graph.degree[node];

    let gain_for = |target: usize| -> f64 {
        let weight = weight_to.get(&target).copied().unwrap_or(0.0);
        weight - community_degree[target] * graph.degree[node] / graph.total
    };

    let mut best = home;
    let mut best_gain = gain_for(home);
    for candidate in candidates {
        if candidate == home {
            continue;
        }
        let gain = gain_for(candidate);
        if gain > best_gain + MIN_GAIN {
            best_gain = gain;
            best = candidate;
        }
    }

    community_degree[best] += graph.degree[node];
    community[node] = best;
    best != home
}

/// Accumulate the weight from `node` to each neighboring community,
/// preserving first-encountered order for deterministic scanning.
fn neighbor_communities(
    graph: &LevelGraph,
    node: usize,
    community: &[usize],
) -> (Vec<usize>, HashMap<usize, f64>) {
    let mut order = Vec::new();
    let mut weight_to: HashMap<usize, f64> = HashMap::new();
    for &(neighbor, weight) in &graph.adjacency[node] {
        let target = community[neighbor];
        let entry = weight_to.entry(target).or_insert_with(|| {
            order.push(target);
            0.0
        });
        *entry += weight;
    }
    (order, weight_to)
}

/// Renumber community ids densely in first-seen order.
fn renumber(community: Vec<usize>) -> Vec<usize> {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    community
        .into_iter()
        .map(|c| {
            let next = remap.len();
            *remap.entry(c).or_insert(next)
        })
        .collect()
}
