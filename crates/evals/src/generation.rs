//! Overlap-based generation metrics
//!
//! Faithfulness and relevancy are heuristic string-overlap scores. Both are
//! expressed through the [`GroundingScorer`] capability so the lexical
//! default can later be swapped for an embedding-based grounding check
//! without touching aggregation or reporting.

use ragscore_core::text;

/// Capability for scoring how well `text` is grounded in `grounding_text`.
///
/// Implementations return a value in [0, 1]; degenerate inputs (no
/// content-bearing tokens on either side) score 0.0 rather than failing.
pub trait GroundingScorer: Send + Sync {
    fn score(&self, text: &str, grounding_text: &str) -> f64;
}

/// Default scorer: fraction of distinct content-bearing tokens of `text`
/// that occur anywhere in `grounding_text`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalOverlapScorer {
    drop_interrogatives: bool,
}

impl LexicalOverlapScorer {
    /// Scorer for response-side texts.
    pub fn new() -> Self {
        Self {
            drop_interrogatives: false,
        }
    }

    /// Scorer for query-side texts; additionally ignores interrogative and
    /// instruction words ("what", "explain", ...).
    pub fn for_queries() -> Self {
        Self {
            drop_interrogatives: true,
        }
    }
}

impl GroundingScorer for LexicalOverlapScorer {
    fn score(&self, text: &str, grounding_text: &str) -> f64 {
        let content = if self.drop_interrogatives {
            text::query_content_tokens(text)
        } else {
            text::content_tokens(text)
        };
        if content.is_empty() {
            return 0.0;
        }

        let grounding = text::token_set(grounding_text);
        if grounding.is_empty() {
            return 0.0;
        }

        let matched = content.iter().filter(|t| grounding.contains(*t)).count();
        (matched as f64 / content.len() as f64).clamp(0.0, 1.0)
    }
}

/// Generation metrics over response, query, and context texts.
pub struct GenerationMetrics {
    grounding: Box<dyn GroundingScorer>,
    relevancy: Box<dyn GroundingScorer>,
}

impl Default for GenerationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationMetrics {
    /// Metrics with the default lexical-overlap scorers.
    pub fn new() -> Self {
        Self {
            grounding: Box::new(LexicalOverlapScorer::new()),
            relevancy: Box::new(LexicalOverlapScorer::for_queries()),
        }
    }

    /// Metrics with custom scoring strategies.
    pub fn with_scorers(
        grounding: Box<dyn GroundingScorer>,
        relevancy: Box<dyn GroundingScorer>,
    ) -> Self {
        Self {
            grounding,
            relevancy,
        }
    }

    /// Fraction of distinct content-bearing response tokens grounded in the
    /// concatenated context passages.
    ///
    /// Empty response, or non-empty response with empty context, scores 0.0.
    pub fn faithfulness(&self, response: &str, context: &[String]) -> f64 {
        let joined = context.join(" ");
        self.grounding.score(response, &joined)
    }

    /// Fraction of distinct content-bearing query tokens that occur in the
    /// response. Empty query or response scores 0.0.
    pub fn relevancy(&self, response: &str, query: &str) -> f64 {
        self.relevancy.score(query, response)
    }

    /// Response length in words.
    pub fn response_length(response: &str) -> usize {
        text::word_count(response)
    }
}
