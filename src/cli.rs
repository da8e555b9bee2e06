use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::clustering::ClusterAlgorithm;
use crate::io::output::OutputFormat;
use crate::normalize::NormalizationMode;

#[derive(Parser, Debug)]
#[command(name = "ordgraf")]
#[command(about = "Semantic word-similarity graph builder and clusterer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand a similarity graph from a seed word and cluster it
    Explore {
        /// Seed word to expand from
        seed: String,

        /// Expansion depth (1 or 2)
        #[arg(long)]
        depth: Option<u32>,

        /// Neighbors admitted per expanded word (1 to 10)
        #[arg(long = "max-neighbors")]
        max_neighbors: Option<usize>,

        /// Minimum similarity score a neighbor must reach
        #[arg(long)]
        threshold: Option<f64>,

        /// Similarity collection to query
        #[arg(long)]
        model: Option<String>,

        /// Word-identity normalization mode
        #[arg(long, value_enum)]
        normalization: Option<NormalizationMode>,

        /// Clustering algorithm
        #[arg(short, long, value_enum)]
        algorithm: Option<ClusterAlgorithm>,

        /// Whispers label-propagation passes
        #[arg(long)]
        iterations: Option<usize>,

        /// Seed for the whispers visitation shuffle
        #[arg(long = "rng-seed")]
        rng_seed: Option<u64>,

        /// Maximum member words shown per cluster
        #[arg(long = "max-words", default_value = "12")]
        max_words: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long, default_value = "ordgraf.toml")]
        config: PathBuf,

        /// Similarity API base URL
        #[arg(long = "base-url", env = "ORDGRAF_BASE_URL")]
        base_url: Option<String>,
    },
    /// Write a commented default ordgraf.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
