// Keyword summary over normalized comment text.
//
// Each comment is its own document, so words shared by every comment are
// weighted down and words distinctive to a few comments rise to the top.

use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use stop_words::{get, LANGUAGE};
use tracing::debug;

/// Top `n` keywords by TF-IDF score, highest first.
pub fn top_keywords(normalized: &[String], n: usize) -> Vec<(String, f32)> {
    let documents: Vec<String> = normalized
        .iter()
        .filter(|t| !t.trim().is_empty())
        .cloned()
        .collect();
    if documents.is_empty() || n == 0 {
        return Vec::new();
    }

    let stop_words: Vec<String> = get(LANGUAGE::English);
    let params = TfIdfParams::UnprocessedDocuments(&documents, &stop_words, None);
    let tfidf = TfIdf::new(params);

    let ranked = tfidf.get_ranked_word_scores(n);
    debug!(
        documents = documents.len(),
        keywords = ranked.len(),
        "Ranked keywords"
    );
    ranked
}
