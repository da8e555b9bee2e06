//! Bounded breadth-first graph expansion.
//!
//! Starting from a seed word, repeatedly queries the similarity source
//! and grows a node/edge set under a global node-count ceiling. The
//! traversal is a plain FIFO queue with per-node status tracking, so
//! expansion order is pure breadth-first and no node is queried twice.
//!
//! Reconciliation rules when the same word or pair is rediscovered:
//! - node depth only ever decreases (shortest path wins)
//! - node surface form is fixed at first discovery
//! - edge weight only ever increases (strongest evidence wins)

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::core::{canonical_pair, Edge, Graph, Neighbor, Node};
use crate::errors::LookupError;
use crate::lookup::SimilarityLookup;
use crate::normalize::{normalize, NormalizationMode};

/// Hard bound on distinct nodes per build; caps worst-case service
/// calls and memory on highly connected seeds.
pub const MAX_GRAPH_NODES: usize = 1000;

/// Options for one graph build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Maximum expansion depth; nodes at this depth are kept as leaves
    /// but never queried
    pub depth: u32,
    /// Maximum neighbors admitted per expanded node
    pub max_neighbors: usize,
    /// Minimum similarity score a neighbor must reach
    pub threshold: f64,
    /// Similarity collection to query
    pub model: String,
    /// How words map to node identifiers
    pub normalization: NormalizationMode,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            max_neighbors: 10,
            threshold: 0.0,
            model: "vss_1850_cos".to_string(),
            normalization: NormalizationMode::Normalized,
        }
    }
}

/// Lifecycle of a discovered node within one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeStatus {
    /// In the graph but not scheduled for expansion
    Pending,
    /// Waiting in the work queue
    Queued,
    /// Already queried; never re-expanded
    Expanded,
}

/// Build a similarity graph by bounded BFS from `seed`.
///
/// A seed that normalizes to the empty identifier short-circuits to an
/// empty graph. A lookup failure aborts the whole build: no partial
/// graph is returned on error.
pub fn build(
    lookup: &dyn SimilarityLookup,
    seed: &str,
    options: &BuildOptions,
) -> Result<Graph, LookupError> {
    let seed_id = normalize(seed, options.normalization);
    if seed_id.is_empty() {
        debug!("seed '{}' normalized to empty, returning empty graph", seed);
        return Ok(Graph::default());
    }

    let mut state = BuildState::default();
    let Some(seed_index) = state.insert_node(seed_id, seed.trim(), 0) else {
        return Ok(state.into_graph());
    };
    state.enqueue(seed_index);

    while let Some(index) = state.queue.pop_front() {
        if state.nodes.len() >= MAX_GRAPH_NODES {
            debug!("node ceiling {} reached, stopping expansion", MAX_GRAPH_NODES);
            break;
        }
        if state.status[index] == NodeStatus::Expanded
            || state.nodes[index].depth >= options.depth
        {
            state.status[index] = NodeStatus::Expanded;
            continue;
        }
        state.status[index] = NodeStatus::Expanded;

        let word = state.nodes[index].word.clone();
        let neighbors = lookup.lookup(&word, options.max_neighbors, &options.model)?;
        let admitted = admit_neighbors(neighbors, options.threshold, options.max_neighbors);
        debug!(
            "expanded '{}' at depth {}: {} neighbors admitted",
            word, state.nodes[index].depth, admitted.len()
        );

        for neighbor in admitted {
            state.absorb_neighbor(index, &neighbor, options);
        }
    }

    Ok(state.into_graph())
}

/// Apply the threshold filter, then the count cap, in that order.
///
/// The ordering is observable: a low-scored entry removed by the
/// threshold frees a slot for a later entry under the cap.
fn admit_neighbors(neighbors: Vec<Neighbor>, threshold: f64, max_neighbors: usize) -> Vec<Neighbor> {
    neighbors
        .into_iter()
        .filter(|n| n.score >= threshold)
        .take(max_neighbors)
        .collect()
}

/// Mutable working state for one build.
#[derive(Default)]
struct BuildState {
    nodes: Vec<Node>,
    status: Vec<NodeStatus>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<Edge>,
    edge_index: HashMap<(String, String), usize>,
    queue: VecDeque<usize>,
}

impl BuildState {
    /// Insert a brand-new node, refusing once the ceiling is reached.
    fn insert_node(&mut self, id: String, word: &str, depth: u32) -> Option<usize> {
        if self.nodes.len() >= MAX_GRAPH_NODES {
            return None;
        }
        let index = self.nodes.len();
        self.index_by_id.insert(id.clone(), index);
        self.nodes.push(Node::new(id, word, depth));
        self.status.push(NodeStatus::Pending);
        Some(index)
    }

    fn enqueue(&mut self, index: usize) {
        self.status[index] = NodeStatus::Queued;
        self.queue.push_back(index);
    }

    /// Fold one admitted neighbor of `parent` into the graph.
    ///
    /// Handles identifier normalization, self-loop dropping, node
    /// find-or-create with min-depth reconciliation, max-weight edge
    /// reconciliation, and the enqueue decision.
    fn absorb_neighbor(&mut self, parent: usize, neighbor: &Neighbor, options: &BuildOptions) {
        let id = normalize(&neighbor.word, options.normalization);
        if id.is_empty() {
            return;
        }
        let parent_id = self.nodes[parent].id.clone();
        if id == parent_id {
            // self-loops are silently dropped
            return;
        }

        let child_depth = self.nodes[parent].depth + 1;
        let child = match self.index_by_id.get(&id) {
            Some(&existing) => {
                if child_depth < self.nodes[existing].depth {
                    self.nodes[existing].depth = child_depth;
                }
                existing
            }
            None => match self.insert_node(id, neighbor.word.trim(), child_depth) {
                Some(created) => created,
                // ceiling reached: the node is dropped along with its edge
                None => return,
            },
        };

        self.reconcile_edge(parent_id, self.nodes[child].id.clone(), neighbor.score);

        if self.nodes[child].depth < options.depth
            && self.status[child] == NodeStatus::Pending
            && self.nodes.len() < MAX_GRAPH_NODES
        {
            self.enqueue(child);
        }
    }

    /// Add or update the canonical edge for an unordered pair,
    /// keeping the maximum weight observed so far.
    fn reconcile_edge(&mut self, a: String, b: String, weight: f64) {
        let key = canonical_pair(a, b);
        match self.edge_index.get(&key) {
            Some(&existing) => {
                if weight > self.edges[existing].weight {
                    self.edges[existing].weight = weight;
                }
            }
            None => {
                let index = self.edges.len();
                self.edges
                    .push(Edge::new(key.0.clone(), key.1.clone(), weight));
                self.edge_index.insert(key, index);
            }
        }
    }

    fn into_graph(self) -> Graph {
        Graph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
