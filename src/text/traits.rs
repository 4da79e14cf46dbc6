// Lemmatizer trait: lets the normalizer swap its base-form reduction
// without touching the rest of the cleaning steps.

use anyhow::Result;

/// Reduces a single token to its base form.
///
/// Implementations must be idempotent: lemmatizing a lemma returns it
/// unchanged. The normalizer relies on that for its own idempotence.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str) -> Result<String>;
}
