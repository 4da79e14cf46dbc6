// Vectorizer trait: the frozen text-to-features transform.
//
// The term-weighting scheme is a trained artifact; the pipeline only needs
// its feature names and a transform. TfIdfVectorizer implements it from an
// exported vocabulary, and tests can plug in anything smaller.

use anyhow::Result;

/// Sparse row: (feature index, weight) pairs, indices into `feature_names()`.
pub type SparseRow = Vec<(usize, f64)>;

/// A frozen vectorizer mapping texts onto a fixed vocabulary.
pub trait Vectorizer: Send + Sync {
    /// Names of the features, indexed the same way as `SparseRow` entries.
    fn feature_names(&self) -> &[String];

    /// Transform each text into a sparse row, returning rows in input order.
    fn transform(&self, texts: &[String]) -> Result<Vec<SparseRow>>;
}
