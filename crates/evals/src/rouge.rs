//! ROUGE-L: longest-common-subsequence overlap
//!
//! The LCS is order-preserving but not necessarily contiguous, so the metric
//! rewards getting the reference's token order right without requiring exact
//! phrasing.

use crate::stats::f_measure;
use ragscore_core::text;
use serde::{Deserialize, Serialize};

/// ROUGE-L precision, recall, and F1 for one response/reference pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RougeScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Compute ROUGE-L between a response and a reference.
///
/// `recall = LCS/len(reference)`, `precision = LCS/len(response)`,
/// `f1 = 2PR/(P+R)`. An empty response or reference yields all zeros.
pub fn rouge_l(response: &str, reference: &str) -> RougeScore {
    let response_tokens = text::tokenize(response);
    let reference_tokens = text::tokenize(reference);

    if response_tokens.is_empty() || reference_tokens.is_empty() {
        return RougeScore::default();
    }

    let lcs = lcs_length(&response_tokens, &reference_tokens) as f64;
    let precision = lcs / response_tokens.len() as f64;
    let recall = lcs / reference_tokens.len() as f64;

    RougeScore {
        precision,
        recall,
        f1: f_measure(precision, recall),
    }
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_length(a: &[String], b: &[String]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for token_a in a {
        for (j, token_b) in b.iter().enumerate() {
            current[j + 1] = if token_a == token_b {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
