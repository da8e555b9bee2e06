//! Result presentation for the CLI.
//!
//! Joins a clustering with the graph's surface words and renders it
//! either as a colored terminal table or as pretty-printed JSON.

use std::collections::HashMap;
use std::io::Write;

use clap::ValueEnum;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use serde::{Deserialize, Serialize};

use crate::clustering::Clustering;
use crate::core::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// One cluster prepared for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterView {
    pub rank: usize,
    pub size: usize,
    /// Member surface words, truncated to the display cap
    pub words: Vec<String>,
    pub truncated: bool,
}

/// Everything the renderer needs from one exploration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploreReport {
    pub seed: String,
    pub model: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub clusters: Vec<ClusterView>,
}

impl ExploreReport {
    /// Join clusters with node surface words, capping the words shown
    /// per cluster at `max_words`.
    pub fn new(
        seed: &str,
        model: &str,
        graph: &Graph,
        clustering: &Clustering,
        max_words: usize,
    ) -> Self {
        let word_by_id: HashMap<&str, &str> = graph
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.word.as_str()))
            .collect();

        let clusters = clustering
            .clusters
            .iter()
            .enumerate()
            .map(|(rank, cluster)| ClusterView {
                rank,
                size: cluster.size,
                words: cluster
                    .members
                    .iter()
                    .take(max_words)
                    .map(|id| word_by_id.get(id.as_str()).unwrap_or(&id.as_str()).to_string())
                    .collect(),
                truncated: cluster.size > max_words,
            })
            .collect();

        Self {
            seed: seed.to_string(),
            model: model.to_string(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            clusters,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ExploreReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ExploreReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ExploreReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} '{}' — {} nodes, {} edges, {} clusters (model {})",
            "ordgraf".bold(),
            report.seed.cyan(),
            report.node_count,
            report.edge_count,
            report.clusters.len(),
            report.model
        )?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["#", "size", "words"]);
        for cluster in &report.clusters {
            let mut words = cluster.words.join(", ");
            if cluster.truncated {
                words.push_str(", …");
            }
            table.add_row(vec![
                Cell::new(cluster.rank),
                Cell::new(cluster.size),
                Cell::new(words),
            ]);
        }
        writeln!(self.writer, "{}", table)?;
        Ok(())
    }
}

/// Pick a writer for the requested format.
pub fn create_writer<W: Write + 'static>(writer: W, format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::Cluster;
    use crate::core::Node;

    fn sample() -> (Graph, Clustering) {
        let graph = Graph {
            nodes: vec![
                Node::new("fisk", "Fisk", 0),
                Node::new("torsk", "torsk", 1),
                Node::new("laks", "laks", 1),
            ],
            edges: vec![],
        };
        let clustering = Clustering {
            clusters: vec![Cluster {
                members: vec!["fisk".into(), "torsk".into(), "laks".into()],
                size: 3,
            }],
            cluster_by_node: [("fisk", 0), ("torsk", 0), ("laks", 0)]
                .into_iter()
                .map(|(id, rank)| (id.to_string(), rank))
                .collect(),
        };
        (graph, clustering)
    }

    #[test]
    fn test_report_joins_surface_words() {
        let (graph, clustering) = sample();
        let report = ExploreReport::new("fisk", "vss_1850_cos", &graph, &clustering, 10);

        assert_eq!(report.clusters.len(), 1);
        assert_eq!(report.clusters[0].words, vec!["Fisk", "torsk", "laks"]);
        assert!(!report.clusters[0].truncated);
    }

    #[test]
    fn test_report_caps_words_per_cluster() {
        let (graph, clustering) = sample();
        let report = ExploreReport::new("fisk", "vss_1850_cos", &graph, &clustering, 2);

        assert_eq!(report.clusters[0].words.len(), 2);
        assert!(report.clusters[0].truncated);
        assert_eq!(report.clusters[0].size, 3);
    }

    #[test]
    fn test_json_writer_emits_valid_json() {
        let (graph, clustering) = sample();
        let report = ExploreReport::new("fisk", "vss_1850_cos", &graph, &clustering, 10);

        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["seed"], "fisk");
        assert_eq!(parsed["node_count"], 3);
    }
}
