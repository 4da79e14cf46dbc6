// Feature encoding with schema alignment.
//
// The vectorizer's vocabulary and the classifier's declared input columns
// can drift apart (a retrained vectorizer, a pruned model). Encoding always
// lands on the classifier's columns: anything the vectorizer did not
// produce is added as a zero block, anything the classifier does not
// declare is dropped, and the order is taken from the classifier.

use anyhow::{Context, Result};
use tracing::debug;

use super::table::FeatureTable;
use super::traits::Vectorizer;

/// Encode normalized texts into a table whose columns are exactly
/// `expected_columns`, in that order.
pub fn encode(
    vectorizer: &dyn Vectorizer,
    texts: &[String],
    expected_columns: &[String],
) -> Result<FeatureTable> {
    let rows = vectorizer
        .transform(texts)
        .context("Vectorizer transform failed")?;

    if rows.len() != texts.len() {
        anyhow::bail!(
            "Vectorizer returned {} rows for {} texts",
            rows.len(),
            texts.len()
        );
    }

    let table = FeatureTable::from_sparse(vectorizer.feature_names().to_vec(), &rows)?;

    // Zero-fill every missing column at once rather than one at a time
    let missing = table.missing_columns(expected_columns);
    let table = if missing.is_empty() {
        table
    } else {
        debug!(
            missing = missing.len(),
            expected = expected_columns.len(),
            "Synthesizing zero columns absent from the vectorizer"
        );
        let block = FeatureTable::zeros(missing, table.n_rows());
        table.concat_columns(block)?
    };

    table
        .select(expected_columns)
        .context("Failed to align features with the model schema")
}
