// Comment text normalization.
//
// Mirrors the cleaning the sentiment model saw at training time: lowercase,
// newlines flattened, everything except letters, digits, whitespace and
// basic punctuation stripped, stopwords removed, and the survivors
// lemmatized. Negation words are kept out of the stopword list because
// "not good" and "good" must not collapse to the same features.
//
// Normalization fails soft. If any step errors, the original text is
// passed through unchanged and the pipeline carries on.

use std::collections::HashSet;

use anyhow::Result;
use stop_words::{get, LANGUAGE};
use tracing::warn;

use super::lemmatize::SuffixLemmatizer;
use super::traits::Lemmatizer;
use crate::output::truncate_chars;

/// Stopwords that carry sentiment signal and are never removed.
pub const PROTECTED_WORDS: [&str; 5] = ["not", "but", "however", "no", "yet"];

/// Punctuation that survives cleaning.
const KEPT_PUNCTUATION: [char; 4] = ['!', '?', '.', ','];

/// Deterministic comment normalizer. Built once and shared read-only.
pub struct TextNormalizer {
    stop_words: HashSet<String>,
    lemmatizer: Box<dyn Lemmatizer>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Box::new(SuffixLemmatizer))
    }
}

impl TextNormalizer {
    /// Normalizer using the NLTK English stopword list, minus `PROTECTED_WORDS`.
    pub fn new(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(stop_words, lemmatizer)
    }

    /// Normalizer with an explicit stopword list. `PROTECTED_WORDS` are
    /// removed from it regardless.
    pub fn with_stop_words<I, S>(stop_words: I, lemmatizer: Box<dyn Lemmatizer>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = stop_words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| !PROTECTED_WORDS.contains(&w.as_str()))
            .collect();

        Self {
            stop_words,
            lemmatizer,
        }
    }

    /// Whether `word` is removed as a stopword.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Normalize a comment, falling back to the original text on failure.
    pub fn normalize(&self, text: &str) -> String {
        match self.try_normalize(text) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!(
                    error = %e,
                    text_preview = %truncate_chars(text, 50),
                    "Normalization failed, keeping original text"
                );
                text.to_string()
            }
        }
    }

    /// Normalize each text in order.
    pub fn normalize_batch(&self, texts: &[String]) -> Vec<String> {
        texts.iter().map(|t| self.normalize(t)).collect()
    }

    /// Run the cleaning steps, surfacing any failure.
    ///
    /// A token is dropped if either it or its lemma is a stopword, so
    /// normalizing already-normalized text is a no-op.
    pub fn try_normalize(&self, text: &str) -> Result<String> {
        let lowered = text.to_lowercase();

        let cleaned: String = lowered
            .trim()
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .filter(|&c| {
                c.is_ascii_alphanumeric() || c.is_whitespace() || KEPT_PUNCTUATION.contains(&c)
            })
            .collect();

        let mut tokens: Vec<String> = Vec::new();
        for word in cleaned.split_whitespace() {
            if self.is_stop_word(word) {
                continue;
            }
            let lemma = self.lemmatizer.lemmatize(word)?;
            if lemma.is_empty() || self.is_stop_word(&lemma) {
                continue;
            }
            tokens.push(lemma);
        }

        Ok(tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_normalizer() -> TextNormalizer {
        TextNormalizer::with_stop_words(
            ["i", "this", "at", "all", "not", "the", "is", "can", "you", "a"],
            Box::new(SuffixLemmatizer),
        )
    }

    #[test]
    fn test_lowercases_and_strips_symbols() {
        let n = small_normalizer();
        assert_eq!(n.normalize("GREAT Video!!! 🔥🔥 #1"), "great video!!! 1");
    }

    #[test]
    fn test_newlines_become_spaces() {
        let n = small_normalizer();
        assert_eq!(n.normalize("first line\nsecond line"), "first line second line");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let n = small_normalizer();
        assert_eq!(n.normalize("  loads   of\t\tspace  "), "load of space");
    }

    #[test]
    fn test_protected_words_survive_even_if_listed() {
        let n = small_normalizer();
        assert!(!n.is_stop_word("not"));
        assert_eq!(n.normalize("not good at all"), "not good");
    }

    #[test]
    fn test_lemmatizes_tokens() {
        let n = small_normalizer();
        assert_eq!(n.normalize("the videos"), "video");
    }

    #[test]
    fn test_empty_input() {
        let n = small_normalizer();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("   \n  "), "");
    }
}
