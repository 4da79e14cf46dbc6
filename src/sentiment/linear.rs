// Linear sentiment classifier evaluated directly from exported weights.
//
// `linear.json` holds a fitted linear model (e.g. scikit-learn's
// LogisticRegression or LinearSVC) as plain arrays:
//
//   { "classes": [-1, 0, 1], "coef": [[...], [...], [...]], "intercept": [..] }
//
// Multi-class models score every class and take the argmax. Binary models
// export a single coefficient row; a positive decision picks `classes[1]`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::schema::ModelSchema;
use super::traits::{ensure_aligned, SentimentClassifier};
use crate::features::table::FeatureTable;

#[derive(Debug, Clone, Deserialize)]
pub struct LinearArtifact {
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

pub struct LinearClassifier {
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    expected_columns: Vec<String>,
}

impl LinearClassifier {
    /// Load weights from `linear.json`, taking the column order from `schema`.
    pub fn load(path: &Path, schema: &ModelSchema) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read linear model from {}", path.display()))?;
        let artifact: LinearArtifact = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse linear model {}", path.display()))?;

        let classifier = Self::new(artifact, schema.column_names())?;
        debug!(
            classes = classifier.classes.len(),
            columns = classifier.expected_columns.len(),
            "Loaded linear classifier from {}",
            path.display()
        );
        Ok(classifier)
    }

    /// Validate weight shapes against the class list and column count.
    pub fn new(artifact: LinearArtifact, expected_columns: Vec<String>) -> Result<Self> {
        let n_classes = artifact.classes.len();
        if n_classes < 2 {
            anyhow::bail!("Linear model needs at least two classes, got {n_classes}");
        }

        let expected_rows = if n_classes == 2 { 1 } else { n_classes };
        if artifact.coef.len() != expected_rows || artifact.intercept.len() != expected_rows {
            anyhow::bail!(
                "Linear model with {} classes needs {} coefficient rows and intercepts, got {} and {}",
                n_classes,
                expected_rows,
                artifact.coef.len(),
                artifact.intercept.len()
            );
        }

        if let Some(row) = artifact
            .coef
            .iter()
            .find(|row| row.len() != expected_columns.len())
        {
            anyhow::bail!(
                "Coefficient row has {} weights but the schema declares {} columns",
                row.len(),
                expected_columns.len()
            );
        }

        Ok(Self {
            classes: artifact.classes,
            coef: artifact.coef,
            intercept: artifact.intercept,
            expected_columns,
        })
    }

    fn decide(&self, row: &[f64]) -> i64 {
        let scores: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, b)| dot(weights, row) + b)
            .collect();

        if self.classes.len() == 2 {
            return if scores[0] > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        // Ties go to the earliest class, matching numpy's argmax
        let mut best = 0;
        for (k, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = k;
            }
        }
        self.classes[best]
    }
}

impl SentimentClassifier for LinearClassifier {
    fn expected_columns(&self) -> &[String] {
        &self.expected_columns
    }

    fn predict(&self, table: &FeatureTable) -> Result<Vec<i64>> {
        ensure_aligned(table, &self.expected_columns)?;
        Ok((0..table.n_rows())
            .map(|r| self.decide(table.row(r)))
            .collect())
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
