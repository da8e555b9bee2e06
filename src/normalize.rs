//! Word normalization for graph-node identity.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How raw words are mapped to canonical node identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationMode {
    /// Trim whitespace but keep the word's casing as-is
    CaseSensitive,
    /// Trim and lowercase, so "Fisk" and "fisk" share one node
    #[default]
    Normalized,
}

/// Map a raw word to its canonical identifier.
///
/// Trims surrounding whitespace; under [`NormalizationMode::Normalized`]
/// also applies Unicode lowercasing, which preserves diacritics (æ/ø/å
/// pass through unchanged). An empty or whitespace-only input yields the
/// empty identifier, which callers must treat as "no node".
pub fn normalize(word: &str, mode: NormalizationMode) -> String {
    let trimmed = word.trim();
    match mode {
        NormalizationMode::CaseSensitive => trimmed.to_string(),
        NormalizationMode::Normalized => trimmed.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitive_keeps_casing() {
        assert_eq!(normalize("Fisk", NormalizationMode::CaseSensitive), "Fisk");
    }

    #[test]
    fn test_normalized_lowercases() {
        assert_eq!(normalize("Fisk", NormalizationMode::Normalized), "fisk");
    }

    #[test]
    fn test_trims_whitespace_in_both_modes() {
        assert_eq!(
            normalize("  torsk \n", NormalizationMode::CaseSensitive),
            "torsk"
        );
        assert_eq!(
            normalize("\tTorsk ", NormalizationMode::Normalized),
            "torsk"
        );
    }

    #[test]
    fn test_norwegian_diacritics_preserved() {
        assert_eq!(normalize("BLÅBÆR", NormalizationMode::Normalized), "blåbær");
        assert_eq!(normalize("Sjø", NormalizationMode::Normalized), "sjø");
    }

    #[test]
    fn test_whitespace_only_normalizes_to_empty() {
        assert_eq!(normalize("   ", NormalizationMode::Normalized), "");
        assert_eq!(normalize("", NormalizationMode::CaseSensitive), "");
    }
}
