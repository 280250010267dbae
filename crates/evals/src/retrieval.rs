//! Rank-based retrieval metrics
//!
//! All metrics consume the ordered candidate list exactly as the pipeline
//! returned it; rank is the 1-indexed position. A missing relevance label
//! anywhere in the list invalidates the retrieval metrics for that query
//! only; sibling queries are unaffected.

use ragscore_core::error::{Error, Result};
use ragscore_core::types::{RetrievalScores, RetrievedDoc};

/// Mean reciprocal rank over the full retrieved list.
///
/// Returns `1/p` for the 1-indexed position `p` of the first relevant
/// document, `0.0` when the list is empty or holds no relevant document.
/// MRR is never truncated to the Hit@k cutoff.
pub fn mrr(docs: &[RetrievedDoc]) -> Result<f64> {
    let labels = relevance_labels(docs)?;
    Ok(mrr_from_labels(&labels))
}

/// Hit@k: whether any of the first `min(k, len)` documents is relevant.
pub fn hit_at_k(docs: &[RetrievedDoc], k: usize) -> Result<f64> {
    validate_cutoff(k)?;
    let labels = relevance_labels(docs)?;
    Ok(hit_from_labels(&labels, k))
}

/// Precision@k with the fixed denominator `k`.
///
/// Positions beyond the end of the list count as non-relevant: a top-k slot
/// left unfilled is a miss.
pub fn precision_at_k(docs: &[RetrievedDoc], k: usize) -> Result<f64> {
    validate_cutoff(k)?;
    let labels = relevance_labels(docs)?;
    Ok(precision_from_labels(&labels, k))
}

/// All three retrieval scores for one query, validated in a single pass.
pub fn scores(docs: &[RetrievedDoc], k: usize) -> Result<RetrievalScores> {
    validate_cutoff(k)?;
    let labels = relevance_labels(docs)?;
    Ok(RetrievalScores {
        mrr: mrr_from_labels(&labels),
        hit_at_k: hit_from_labels(&labels, k),
        precision_at_k: precision_from_labels(&labels, k),
    })
}

// Labels are validated once for the whole list so that a malformed item is
// reported regardless of where the first relevant document sits.
fn relevance_labels(docs: &[RetrievedDoc]) -> Result<Vec<bool>> {
    docs.iter().map(RetrievedDoc::relevance).collect()
}

fn validate_cutoff(k: usize) -> Result<()> {
    if k == 0 {
        return Err(Error::invalid_input("retrieval cutoff k must be at least 1"));
    }
    Ok(())
}

fn mrr_from_labels(labels: &[bool]) -> f64 {
    labels
        .iter()
        .position(|&relevant| relevant)
        .map_or(0.0, |idx| 1.0 / (idx + 1) as f64)
}

fn hit_from_labels(labels: &[bool], k: usize) -> f64 {
    if labels.iter().take(k).any(|&relevant| relevant) {
        1.0
    } else {
        0.0
    }
}

fn precision_from_labels(labels: &[bool], k: usize) -> f64 {
    let relevant = labels.iter().take(k).filter(|&&r| r).count();
    relevant as f64 / k as f64
}
