//! Data model for per-query evaluation inputs and results

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single query in the evaluation dataset.
///
/// Records are immutable: they are created once when the dataset loads and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// Unique identifier for the query (e.g. "Q1")
    pub id: String,
    /// The query text sent to the pipeline
    pub text: String,
    /// Topical category (e.g. "kinematics")
    #[serde(default)]
    pub category: String,
    /// Topics a good answer is expected to touch
    #[serde(default)]
    pub expected_topics: BTreeSet<String>,
    /// Reference answer for advanced metrics, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_answer: Option<String>,
}

impl QueryRecord {
    /// Fraction of expected topics mentioned in `response`.
    ///
    /// Topics may span several words ("universal law"); matching is
    /// case-insensitive on the raw text. Returns `None` when the record
    /// declares no expected topics.
    pub fn topic_coverage(&self, response: &str) -> Option<f64> {
        if self.expected_topics.is_empty() {
            return None;
        }
        let response = response.to_lowercase();
        let mentioned = self
            .expected_topics
            .iter()
            .filter(|topic| response.contains(&topic.to_lowercase()))
            .count();
        Some(mentioned as f64 / self.expected_topics.len() as f64)
    }
}

/// A retrieved document as returned by the RAG pipeline.
///
/// Position in the retrieved sequence is significant: rank is the 1-indexed
/// position. The relevance flag arrives from an external labelling step and
/// may be missing, which is the malformed-input case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDoc {
    /// Document content
    pub content: String,
    /// Retrieval score, if the pipeline reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    /// Relevance label; `None` means the label is missing (malformed)
    #[serde(default)]
    pub is_relevant: Option<bool>,
}

impl RetrievedDoc {
    /// Create a labelled retrieved document.
    pub fn new(content: impl Into<String>, is_relevant: bool) -> Self {
        Self {
            content: content.into(),
            score: None,
            is_relevant: Some(is_relevant),
        }
    }

    /// Create a document with no relevance label (malformed input).
    pub fn unlabeled(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            score: None,
            is_relevant: None,
        }
    }

    /// The relevance label, or an invalid-input error when it is missing.
    pub fn relevance(&self) -> Result<bool> {
        self.is_relevant
            .ok_or_else(|| Error::invalid_input("retrieved document missing relevance label"))
    }
}

/// Per-query output of the RAG pipeline, consumed read-only by the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Identifier of the query this output answers
    pub query_id: String,
    /// Generated response text
    pub response: String,
    /// Context passages actually used for generation
    pub context: Vec<String>,
    /// Full ranked candidate list, independent of what was used for generation
    pub retrieved: Vec<RetrievedDoc>,
}

/// Rank-based retrieval scores for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrievalScores {
    /// Reciprocal rank of the first relevant document over the full list
    pub mrr: f64,
    /// Whether any relevant document appears in the top k
    pub hit_at_k: f64,
    /// Fraction of the top k slots holding a relevant document
    pub precision_at_k: f64,
}

/// Reference-based generation scores for one query.
///
/// Present only when a reference answer existed, advanced mode was requested,
/// and the embedding backend was available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvancedScores {
    pub bertscore_precision: f64,
    pub bertscore_recall: f64,
    pub bertscore_f1: f64,
    pub rouge_l_precision: f64,
    pub rouge_l_recall: f64,
    pub rouge_l_f1: f64,
    pub bleu: f64,
}

/// One evaluation record per query.
///
/// `None` fields mean the metric was unavailable for this query, never a
/// silently-substituted zero. Zero always means "computed and is zero".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Identifier of the evaluated query
    pub query_id: String,
    /// Retrieval scores; `None` when the retrieved list was malformed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval: Option<RetrievalScores>,
    /// Fraction of response content tokens grounded in the context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faithfulness: Option<f64>,
    /// Fraction of query content tokens addressed by the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevancy: Option<f64>,
    /// Response length in words
    pub response_length: usize,
    /// Reference-based scores, when computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced: Option<AdvancedScores>,
}

impl EvaluationResult {
    /// Whether any advanced scores were computed for this query.
    pub fn has_advanced(&self) -> bool {
        self.advanced.is_some()
    }
}

/// Mean and sample standard deviation over the present values of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation (ddof = 1; 0.0 when fewer than 2 values)
    pub stddev: f64,
    /// Number of queries where the metric was present
    pub count: usize,
}

/// Aggregated report over a completed batch of evaluations.
///
/// Per-query rows preserve dataset order; the statistics themselves are
/// order-independent. Metrics with zero present values are omitted from
/// `stats` and rendered as "N/A" by the reporting layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Per-query results in dataset order
    pub per_query: Vec<EvaluationResult>,
    /// Summary statistics keyed by metric name
    pub stats: BTreeMap<String, MetricSummary>,
}

impl AggregateReport {
    /// Look up the summary for a metric by name.
    pub fn summary(&self, metric: &str) -> Option<&MetricSummary> {
        self.stats.get(metric)
    }

    /// Whether any per-query result carries advanced scores.
    pub fn has_advanced(&self) -> bool {
        self.per_query.iter().any(EvaluationResult::has_advanced)
    }
}
