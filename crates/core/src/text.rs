//! Text normalization shared by the lexical metrics
//!
//! Normalization strategy:
//! 1. Segment into unicode words (strips punctuation)
//! 2. Normalize to lowercase
//!
//! Stop-word filtering applies only to the overlap metrics (faithfulness,
//! relevancy); the alignment metrics (ROUGE-L, BLEU, BERTScore) need surface
//! forms and use the plain token sequence.

use std::collections::{BTreeSet, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Tokens shorter than this carry little content and are not counted as
/// content-bearing.
const MIN_CONTENT_LEN: usize = 4;

/// Common function words excluded from content-token overlap.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "can", "this", "that", "these", "those",
];

/// Interrogative and instruction words additionally excluded when the text
/// is a query ("what is X" should match on X, not on "what").
const QUERY_STOP_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "explain", "describe", "discuss",
    "provide", "define", "state", "derive",
];

/// Lowercased unicode-word tokens in order, duplicates preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Response length in whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// The set of all normalized tokens, for membership checks on the grounding
/// side of an overlap metric.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Distinct content-bearing tokens: stop words and short tokens removed.
pub fn content_tokens(text: &str) -> BTreeSet<String> {
    filtered_tokens(text, STOP_WORDS)
}

/// Distinct content-bearing tokens of a query; additionally drops
/// interrogative and instruction words.
pub fn query_content_tokens(text: &str) -> BTreeSet<String> {
    let mut tokens = filtered_tokens(text, STOP_WORDS);
    for word in QUERY_STOP_WORDS {
        tokens.remove(*word);
    }
    tokens
}

fn filtered_tokens(text: &str, stop_words: &[&str]) -> BTreeSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_CONTENT_LEN && !stop_words.contains(&t.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_lowercases_and_strips_punctuation() {
        let tokens = tokenize("Newton's first law, of Motion!");
        assert_eq!(
            tokens,
            vec!["newton's", "first", "law", "of", "motion"]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\n ").is_empty());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("force equals mass times acceleration"), 5);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_content_tokens_drop_stop_words_and_short_tokens() {
        let tokens = content_tokens("The force is applied to an object");
        assert!(tokens.contains("force"));
        assert!(tokens.contains("applied"));
        assert!(tokens.contains("object"));
        assert!(!tokens.contains("the"));
        assert!(!tokens.contains("is"));
        // "to" and "an" are both stop words and too short
        assert!(!tokens.contains("to"));
    }

    #[test]
    fn test_query_content_tokens_drop_interrogatives() {
        let tokens = query_content_tokens("What is gravitational force? Explain with examples.");
        assert!(tokens.contains("gravitational"));
        assert!(tokens.contains("force"));
        assert!(tokens.contains("examples"));
        assert!(!tokens.contains("what"));
        assert!(!tokens.contains("explain"));
    }

    #[test]
    fn test_content_tokens_distinct() {
        let tokens = content_tokens("energy energy energy conservation");
        assert_eq!(tokens.len(), 2);
    }
}
