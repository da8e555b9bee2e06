//! Shared test fixtures: in-memory similarity sources.
#![allow(dead_code)]

use std::collections::HashMap;

use ordgraf::{LookupError, Neighbor, SimilarityLookup};

/// Lookup backed by a fixed word → neighbors table.
pub struct TableLookup {
    table: HashMap<String, Vec<Neighbor>>,
}

impl TableLookup {
    pub fn new(entries: &[(&str, &[(&str, f64)])]) -> Self {
        let table = entries
            .iter()
            .map(|(word, neighbors)| {
                (
                    word.to_string(),
                    neighbors
                        .iter()
                        .map(|(w, s)| Neighbor::new(*w, *s))
                        .collect(),
                )
            })
            .collect();
        Self { table }
    }
}

impl SimilarityLookup for TableLookup {
    fn lookup(&self, word: &str, _limit: usize, _model: &str) -> Result<Vec<Neighbor>, LookupError> {
        Ok(self.table.get(word).cloned().unwrap_or_default())
    }
}

/// Lookup that fans out `limit` synthetic children per word, for
/// exercising the node-count ceiling.
pub struct FanOutLookup;

impl SimilarityLookup for FanOutLookup {
    fn lookup(&self, word: &str, limit: usize, _model: &str) -> Result<Vec<Neighbor>, LookupError> {
        Ok((0..limit)
            .map(|i| Neighbor::new(format!("{}{}", word, i), 0.5))
            .collect())
    }
}
