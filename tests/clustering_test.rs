mod common;

use common::TableLookup;
use ordgraf::clustering::louvain;
use ordgraf::{
    build, cluster, BuildOptions, ClusterAlgorithm, ClusterParams, Edge, Graph, Node,
};
use pretty_assertions::assert_eq;

fn graph(node_ids: &[&str], edges: &[(&str, &str, f64)]) -> Graph {
    Graph {
        nodes: node_ids.iter().map(|id| Node::new(*id, *id, 1)).collect(),
        edges: edges
            .iter()
            .map(|(a, b, w)| Edge::new(*a, *b, *w))
            .collect(),
    }
}

fn two_communities() -> Graph {
    graph(
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
    )
}

#[test]
fn test_both_algorithms_honor_the_output_contract() {
    let g = two_communities();
    for algorithm in [ClusterAlgorithm::Whispers, ClusterAlgorithm::Louvain] {
        let clustering = cluster(&g, algorithm, &ClusterParams::default());

        // total over the node set
        assert_eq!(clustering.cluster_by_node.len(), g.node_count());
        for node in &g.nodes {
            let rank = clustering.cluster_by_node[&node.id];
            assert!(clustering.clusters[rank].members.contains(&node.id));
        }

        // non-increasing sizes, sizes consistent with members
        for window in clustering.clusters.windows(2) {
            assert!(window[0].size >= window[1].size);
        }
        for c in &clustering.clusters {
            assert_eq!(c.size, c.members.len());
        }
    }
}

#[test]
fn test_both_algorithms_find_the_two_communities() {
    let g = two_communities();
    for algorithm in [ClusterAlgorithm::Whispers, ClusterAlgorithm::Louvain] {
        let clustering = cluster(&g, algorithm, &ClusterParams::default());
        assert_eq!(clustering.clusters.len(), 2, "{:?}", algorithm);
        assert_eq!(
            clustering.cluster_by_node["a"],
            clustering.cluster_by_node["c"]
        );
        assert_ne!(
            clustering.cluster_by_node["a"],
            clustering.cluster_by_node["z"]
        );
    }
}

#[test]
fn test_whispers_edgeless_graph_gives_n_singletons() {
    let g = graph(&["a", "b", "c", "d", "e"], &[]);
    let clustering = cluster(&g, ClusterAlgorithm::Whispers, &ClusterParams::default());

    assert_eq!(clustering.clusters.len(), 5);
    assert!(clustering.clusters.iter().all(|c| c.size == 1));
}

#[test]
fn test_louvain_rerun_keeps_modularity() {
    let g = two_communities();
    let first = cluster(&g, ClusterAlgorithm::Louvain, &ClusterParams::default());
    let second = cluster(&g, ClusterAlgorithm::Louvain, &ClusterParams::default());

    assert_eq!(louvain::modularity(&g, &first), louvain::modularity(&g, &second));
    let sizes = |c: &ordgraf::Clustering| c.clusters.iter().map(|c| c.size).collect::<Vec<_>>();
    assert_eq!(sizes(&first), sizes(&second));
}

#[test]
fn test_build_then_cluster_end_to_end() {
    let lookup = TableLookup::new(&[
        ("fisk", &[("torsk", 0.9), ("laks", 0.85), ("båt", 0.3)][..]),
        ("torsk", &[("laks", 0.8), ("fisk", 0.9)][..]),
        ("båt", &[("skip", 0.9)][..]),
    ]);
    let options = BuildOptions {
        depth: 2,
        ..BuildOptions::default()
    };
    let g = build(&lookup, "fisk", &options).unwrap();
    let clustering = cluster(&g, ClusterAlgorithm::Louvain, &ClusterParams::default());

    assert_eq!(clustering.cluster_by_node.len(), g.node_count());
    // the fish words hang together
    assert_eq!(
        clustering.cluster_by_node["fisk"],
        clustering.cluster_by_node["torsk"]
    );
}

#[test]
fn test_cluster_on_empty_graph_is_empty() {
    let clustering = cluster(
        &Graph::default(),
        ClusterAlgorithm::Louvain,
        &ClusterParams::default(),
    );
    assert!(clustering.clusters.is_empty());
    assert!(clustering.cluster_by_node.is_empty());
}
