use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use ordgraf::cli::{Cli, Commands};
use ordgraf::clustering::{self, ClusterAlgorithm, ClusterParams};
use ordgraf::config::{
    clamp_depth, clamp_max_neighbors, clamp_threshold, default_config_template, OrdgrafConfig,
    DEFAULT_CONFIG_FILE,
};
use ordgraf::io::output::{create_writer, ExploreReport, OutputFormat};
use ordgraf::lookup::{DhlabClient, DhlabConfig};
use ordgraf::normalize::NormalizationMode;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Explore {
            seed,
            depth,
            max_neighbors,
            threshold,
            model,
            normalization,
            algorithm,
            iterations,
            rng_seed,
            max_words,
            format,
            output,
            config,
            base_url,
        } => {
            let explore = ExploreConfig::merge(
                OrdgrafConfig::load(&config).map_err(|e| anyhow!(e))?,
                ExploreOverrides {
                    depth,
                    max_neighbors,
                    threshold,
                    model,
                    normalization,
                    algorithm,
                    iterations,
                    rng_seed,
                    base_url,
                },
            );
            handle_explore(&seed, &explore, max_words, format, output)
        }
        Commands::Init { force } => handle_init(force),
    }
}

/// CLI flags that override config-file values when present.
struct ExploreOverrides {
    depth: Option<u32>,
    max_neighbors: Option<usize>,
    threshold: Option<f64>,
    model: Option<String>,
    normalization: Option<NormalizationMode>,
    algorithm: Option<ClusterAlgorithm>,
    iterations: Option<usize>,
    rng_seed: Option<u64>,
    base_url: Option<String>,
}

/// Fully resolved settings for one exploration.
struct ExploreConfig {
    config: OrdgrafConfig,
}

impl ExploreConfig {
    fn merge(mut config: OrdgrafConfig, overrides: ExploreOverrides) -> Self {
        if let Some(depth) = overrides.depth {
            config.depth = clamp_depth(depth);
        }
        if let Some(max_neighbors) = overrides.max_neighbors {
            config.max_neighbors = clamp_max_neighbors(max_neighbors);
        }
        if let Some(threshold) = overrides.threshold {
            config.threshold = clamp_threshold(threshold);
        }
        if let Some(model) = overrides.model {
            config.model = model;
        }
        if let Some(normalization) = overrides.normalization {
            config.normalization = normalization;
        }
        if let Some(algorithm) = overrides.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(iterations) = overrides.iterations {
            config.iterations = iterations;
        }
        if let Some(rng_seed) = overrides.rng_seed {
            config.rng_seed = rng_seed;
        }
        if let Some(base_url) = overrides.base_url {
            config.base_url = base_url;
        }
        Self { config }
    }
}

fn handle_explore(
    seed: &str,
    explore: &ExploreConfig,
    max_words: usize,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = &explore.config;
    let client = DhlabClient::new(DhlabConfig {
        base_url: config.base_url.clone(),
        timeout_ms: config.timeout_ms,
    })
    .context("could not construct similarity client")?;

    let options = config.build_options();
    let graph = ordgraf::graph::build(&client, seed, &options)
        .with_context(|| format!("graph build from '{}' failed", seed))?;

    let params = ClusterParams {
        iterations: config.iterations,
        rng_seed: config.rng_seed,
    };
    let clustering = clustering::cluster(&graph, config.algorithm, &params);

    let report = ExploreReport::new(seed, &config.model, &graph, &clustering, max_words);
    let destination: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(&path)
                .with_context(|| format!("could not create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    create_writer(destination, format).write_report(&report)
}

fn handle_init(force: bool) -> Result<()> {
    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists, pass --force to overwrite",
            path.display()
        ));
    }
    std::fs::write(&path, default_config_template())
        .with_context(|| format!("could not write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
