// TF-IDF vectorizer loaded from an exported artifact.
//
// The vocabulary and idf weights were fitted at training time and are
// frozen here. `vectorizer.json` is a straight dump of the fitted
// scikit-learn TfidfVectorizer state:
//
//   { "vocabulary": {"term": index, ...}, "idf": [..], "ngram_range": [1, 3],
//     "sublinear_tf": false, "norm": "l2" }
//
// Transform semantics follow the same defaults: tokens match `\b\w\w+\b`,
// n-grams are space-joined, raw counts (or 1 + ln(tf)) are scaled by idf,
// and each row is normalized.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use regex_lite::Regex;
use serde::Deserialize;
use tracing::debug;

use super::traits::{SparseRow, Vectorizer};

/// Row normalization applied after idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub struct TfIdfArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    /// Missing means l2; an explicit `null` disables normalization.
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Frozen TF-IDF vectorizer.
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    feature_names: Vec<String>,
    token_pattern: Regex,
}

impl TfIdfVectorizer {
    /// Load a vectorizer from a `vectorizer.json` export.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vectorizer from {}", path.display()))?;
        let artifact: TfIdfArtifact = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse vectorizer {}", path.display()))?;
        let vectorizer = Self::from_artifact(artifact)?;

        debug!(
            features = vectorizer.feature_names.len(),
            "Loaded TF-IDF vectorizer from {}",
            path.display()
        );
        Ok(vectorizer)
    }

    /// Build a vectorizer from an already-parsed artifact, validating that
    /// the vocabulary indices and idf weights line up.
    pub fn from_artifact(artifact: TfIdfArtifact) -> Result<Self> {
        let width = artifact.vocabulary.len();
        if artifact.idf.len() != width {
            anyhow::bail!(
                "Vectorizer has {} vocabulary terms but {} idf weights",
                width,
                artifact.idf.len()
            );
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            anyhow::bail!("Invalid ngram_range ({min_n}, {max_n})");
        }

        // Invert the vocabulary into index order, catching gaps and duplicates
        let by_index: BTreeMap<usize, &String> = artifact
            .vocabulary
            .iter()
            .map(|(term, &idx)| (idx, term))
            .collect();
        if by_index.len() != width || by_index.keys().next_back().is_some_and(|&i| i >= width) {
            anyhow::bail!("Vectorizer vocabulary indices are not a contiguous 0..{width} range");
        }
        let feature_names = by_index.into_values().cloned().collect();

        let token_pattern = Regex::new(r"\b\w\w+\b").context("Failed to compile token pattern")?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            feature_names,
            token_pattern,
        })
    }

    /// Vectorize a single text.
    fn transform_one(&self, text: &str) -> SparseRow {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        // Term counts for every n-gram that is in the vocabulary
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            for gram in tokens.windows(n) {
                let term = gram.join(" ");
                if let Some(&idx) = self.vocabulary.get(&term) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.idf[idx])
            })
            .collect();

        let norm = match self.norm {
            Some(Norm::L2) => row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => row.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            for (_, w) in &mut row {
                *w /= norm;
            }
        }

        row
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn transform(&self, texts: &[String]) -> Result<Vec<SparseRow>> {
        Ok(texts.iter().map(|t| self.transform_one(t)).collect())
    }
}
