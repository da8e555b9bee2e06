//! Graph construction from a similarity source.

pub mod builder;

pub use builder::{build, BuildOptions, MAX_GRAPH_NODES};
