// Export modules for library usage
pub mod cli;
pub mod clustering;
pub mod config;
pub mod core;
pub mod errors;
pub mod graph;
pub mod io;
pub mod lookup;
pub mod normalize;

// Re-export commonly used types
pub use crate::clustering::{cluster, Cluster, ClusterAlgorithm, ClusterParams, Clustering};
pub use crate::config::OrdgrafConfig;
pub use crate::core::{Edge, Graph, Neighbor, Node};
pub use crate::errors::LookupError;
pub use crate::graph::{build, BuildOptions, MAX_GRAPH_NODES};
pub use crate::io::output::{create_writer, ExploreReport, OutputFormat, OutputWriter};
pub use crate::lookup::{DhlabClient, DhlabConfig, SimilarityLookup};
pub use crate::normalize::{normalize, NormalizationMode};
