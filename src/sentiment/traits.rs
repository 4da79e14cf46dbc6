// Sentiment classifier trait: the swap-ready abstraction.

use anyhow::Result;

use crate::features::table::FeatureTable;

/// A trained classifier over a fixed, ordered set of input columns.
pub trait SentimentClassifier: Send + Sync {
    /// The exact ordered feature names the model requires as input.
    fn expected_columns(&self) -> &[String];

    /// Predict one raw label per row, in row order.
    ///
    /// `table` must already be aligned to `expected_columns()`.
    fn predict(&self, table: &FeatureTable) -> Result<Vec<i64>>;
}

/// Bail unless `table` is aligned to `expected`.
pub(crate) fn ensure_aligned(table: &FeatureTable, expected: &[String]) -> Result<()> {
    if table.columns() != expected {
        anyhow::bail!(
            "Feature table has {} columns but the model expects {} in a fixed order",
            table.n_cols(),
            expected.len()
        );
    }
    Ok(())
}
