// Rule-based noun lemmatizer.
//
// Approximates WordNet's noun morphology (the default part of speech the
// sentiment model was trained with) using an irregular-plural table and
// a handful of suffix rules. No dictionary lookup, so a few regular-looking
// words are stripped that WordNet would keep. The rules are chosen so the
// output is always a fixed point.

use anyhow::Result;

use super::traits::Lemmatizer;

/// Irregular plurals mapped to their singular. No value is itself a key
/// and none ends in a suffix the rules below would strip.
const IRREGULAR_PLURALS: [(&str, &str); 12] = [
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("halves", "half"),
];

/// Default lemmatizer used by `TextNormalizer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixLemmatizer;

impl Lemmatizer for SuffixLemmatizer {
    fn lemmatize(&self, word: &str) -> Result<String> {
        Ok(lemmatize_noun(word))
    }
}

/// Reduce a lowercase token to its singular form.
///
/// Tokens containing anything but ASCII letters (digits, trailing
/// punctuation) are returned unchanged.
pub fn lemmatize_noun(word: &str) -> String {
    if !word.chars().all(|c| c.is_ascii_lowercase()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR_PLURALS.iter().find(|(plural, _)| *plural == word) {
        return singular.to_string();
    }

    let len = word.len();

    // "glass", "bus", "analysis" are already singular
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    if len > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..len - 3]);
    }

    if len > 4
        && (word.ends_with("sses")
            || word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("xes"))
    {
        return word[..len - 2].to_string();
    }

    if len > 3 && word.ends_with('s') {
        return word[..len - 1].to_string();
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(lemmatize_noun("videos"), "video");
        assert_eq!(lemmatize_noun("comments"), "comment");
        assert_eq!(lemmatize_noun("tutorials"), "tutorial");
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(lemmatize_noun("studies"), "study");
        assert_eq!(lemmatize_noun("glasses"), "glass");
        assert_eq!(lemmatize_noun("churches"), "church");
        assert_eq!(lemmatize_noun("wishes"), "wish");
        assert_eq!(lemmatize_noun("boxes"), "box");
    }

    #[test]
    fn test_singulars_untouched() {
        for word in ["glass", "bus", "analysis", "gas", "love", "good"] {
            assert_eq!(lemmatize_noun(word), word);
        }
    }

    #[test]
    fn test_irregulars() {
        assert_eq!(lemmatize_noun("children"), "child");
        assert_eq!(lemmatize_noun("women"), "woman");
        assert_eq!(lemmatize_noun("leaves"), "leaf");
    }

    #[test]
    fn test_non_alphabetic_tokens_untouched() {
        assert_eq!(lemmatize_noun("videos!"), "videos!");
        assert_eq!(lemmatize_noun("2020s"), "2020s");
    }

    #[test]
    fn test_lemmas_are_fixed_points() {
        let words = [
            "videos", "studies", "glasses", "churches", "wishes", "boxes", "children", "ties",
            "series", "buses", "houses", "knives", "cats", "axes", "news", "thanks",
        ];
        for word in words {
            let once = lemmatize_noun(word);
            assert_eq!(lemmatize_noun(&once), once, "lemma of {word} is not stable");
        }
    }
}
