//! BLEU: clipped n-gram precision with a brevity penalty
//!
//! Orders 1 through 4 are combined by geometric mean. When any order's
//! precision would be zero, 1 is added to every order's numerator and
//! denominator so a single missing n-gram order cannot collapse the whole
//! score.

use ragscore_core::text;
use std::collections::HashMap;

/// Highest n-gram order considered.
const MAX_ORDER: usize = 4;

/// Compute BLEU between a response and a reference.
///
/// Returns a value in [0, 1]; an empty response or reference yields 0.0, and
/// `bleu(x, x) == 1.0` for any non-empty tokenizable `x`.
pub fn bleu(response: &str, reference: &str) -> f64 {
    let response_tokens = text::tokenize(response);
    let reference_tokens = text::tokenize(reference);

    if response_tokens.is_empty() || reference_tokens.is_empty() {
        return 0.0;
    }

    // (clipped matches, total response n-grams) per order
    let mut counts = [(0usize, 0usize); MAX_ORDER];
    for (order, entry) in counts.iter_mut().enumerate() {
        *entry = clipped_ngram_counts(&response_tokens, &reference_tokens, order + 1);
    }

    let smooth = counts.iter().any(|&(clipped, total)| clipped == 0 || total == 0);

    let mut log_sum = 0.0;
    for &(clipped, total) in &counts {
        let precision = if smooth {
            (clipped + 1) as f64 / (total + 1) as f64
        } else {
            clipped as f64 / total as f64
        };
        log_sum += precision.ln();
    }
    let geometric_mean = (log_sum / MAX_ORDER as f64).exp();

    geometric_mean * brevity_penalty(response_tokens.len(), reference_tokens.len())
}

/// Clipped matches and total candidate n-grams of the given order.
///
/// Each response n-gram counts at most as often as it appears in the
/// reference, so repeating a reference phrase cannot inflate precision.
fn clipped_ngram_counts(
    response: &[String],
    reference: &[String],
    order: usize,
) -> (usize, usize) {
    if response.len() < order {
        return (0, 0);
    }

    let mut reference_counts: HashMap<&[String], usize> = HashMap::new();
    for ngram in reference.windows(order) {
        *reference_counts.entry(ngram).or_insert(0) += 1;
    }

    let mut response_counts: HashMap<&[String], usize> = HashMap::new();
    for ngram in response.windows(order) {
        *response_counts.entry(ngram).or_insert(0) += 1;
    }

    let clipped = response_counts
        .iter()
        .map(|(ngram, &count)| count.min(reference_counts.get(ngram).copied().unwrap_or(0)))
        .sum();
    let total = response.len() - order + 1;

    (clipped, total)
}

/// `exp(1 - |ref|/|resp|)` when the response is shorter than the reference.
fn brevity_penalty(response_len: usize, reference_len: usize) -> f64 {
    if response_len >= reference_len {
        1.0
    } else {
        (1.0 - reference_len as f64 / response_len as f64).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_scores_one() {
        let text = "work is done when a force causes displacement in its direction";
        assert!((bleu(text, text) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_identity_short_text_scores_one() {
        // Fewer than four tokens: the missing higher orders are smoothed to
        // (0+1)/(0+1) and must not break the identity property.
        assert!((bleu("force equals mass", "force equals mass") - 1.0).abs() < 1e-12);
        assert!((bleu("force", "force") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(bleu("", "force equals mass"), 0.0);
        assert_eq!(bleu("force equals mass", ""), 0.0);
        assert_eq!(bleu("", ""), 0.0);
    }

    #[test]
    fn test_no_overlap_scores_near_zero() {
        let score = bleu(
            "completely unrelated answer text here",
            "newton first law of motion states inertia",
        );
        assert!(score < 0.3);
        assert!(score >= 0.0);
    }

    #[test]
    fn test_partial_overlap_between_zero_and_one() {
        let score = bleu(
            "newton first law states that objects stay at rest",
            "newton first law of motion states that an object at rest stays at rest",
        );
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_brevity_penalty_applies_to_short_responses() {
        let reference = "newton first law of motion states that an object at rest stays at rest";
        let long_enough = bleu(reference, reference);
        let truncated = bleu("newton first law of motion states that", reference);
        assert!(truncated < long_enough);
    }

    #[test]
    fn test_clipping_caps_repeated_ngrams() {
        let response: Vec<String> = ["force", "force", "force"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let reference: Vec<String> = ["the", "force", "is", "applied"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        // "force" appears once in the reference, so only one of the three
        // mentions counts.
        let (clipped, total) = clipped_ngram_counts(&response, &reference, 1);
        assert_eq!(clipped, 1);
        assert_eq!(total, 3);
    }

    #[test]
    fn test_brevity_penalty_helper() {
        assert_eq!(brevity_penalty(10, 10), 1.0);
        assert_eq!(brevity_penalty(12, 10), 1.0);
        let penalty = brevity_penalty(5, 10);
        assert!((penalty - (1.0 - 2.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_scores_bounded() {
        for (a, b) in [
            ("a", "a b c d e"),
            ("a b c d e", "a"),
            ("x y z", "z y x"),
            ("the same the same", "the same"),
        ] {
            let score = bleu(a, b);
            assert!((0.0..=1.0).contains(&score), "bleu({a:?}, {b:?}) = {score}");
        }
    }
}
