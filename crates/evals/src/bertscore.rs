//! BERTScore: embedding-based token matching
//!
//! Every token of the response and reference is embedded through the
//! injected provider; precision is the mean over response tokens of the best
//! cosine similarity against any reference token, recall the symmetric
//! quantity. The matching algorithm is independent of the embedding model,
//! so tests run against a deterministic stub.

use crate::stats::f_measure;
use ragscore_core::error::{Error, Result};
use ragscore_core::text;
use ragscore_embeddings::EmbeddingManager;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// BERTScore precision, recall, and F1 for one response/reference pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BertScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Compute BERTScore between a response and a reference.
///
/// An empty response or reference yields all zeros. A provider failure
/// surfaces as an error, never a silent score; the caller decides how the
/// batch degrades.
pub async fn bertscore(
    response: &str,
    reference: &str,
    embeddings: &EmbeddingManager,
) -> Result<BertScore> {
    let response_tokens = text::tokenize(response);
    let reference_tokens = text::tokenize(reference);

    if response_tokens.is_empty() || reference_tokens.is_empty() {
        return Ok(BertScore::default());
    }

    // Embed each distinct token once; both sides usually share vocabulary.
    let vocabulary: Vec<String> = response_tokens
        .iter()
        .chain(reference_tokens.iter())
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    let embedded = embeddings.embed(vocabulary.clone()).await?;

    let mut table: HashMap<&str, &Vec<f32>> = HashMap::new();
    for (token, embedding) in vocabulary.iter().zip(&embedded) {
        if let Some(vector) = embedding {
            table.insert(token.as_str(), vector);
        }
    }

    let response_vectors = side_vectors(&response_tokens, &table);
    let reference_vectors = side_vectors(&reference_tokens, &table);

    if response_vectors.is_empty() || reference_vectors.is_empty() {
        return Err(Error::model_unavailable(
            "embedding backend returned no vectors for scoring",
        ));
    }

    let precision = mean_max_similarity(&response_vectors, &reference_vectors);
    let recall = mean_max_similarity(&reference_vectors, &response_vectors);

    Ok(BertScore {
        precision,
        recall,
        f1: f_measure(precision, recall),
    })
}

/// Vectors for one side's token sequence, duplicates preserved so repeated
/// tokens keep their weight in the mean.
fn side_vectors<'a>(
    tokens: &[String],
    table: &HashMap<&str, &'a Vec<f32>>,
) -> Vec<&'a Vec<f32>> {
    tokens
        .iter()
        .filter_map(|t| table.get(t.as_str()).copied())
        .collect()
}

/// Mean over `from` of the maximum cosine similarity against `against`.
///
/// Similarities are clamped to [0, 1]: anti-correlated embeddings mean
/// "no match", not negative credit.
fn mean_max_similarity(from: &[&Vec<f32>], against: &[&Vec<f32>]) -> f64 {
    let total: f64 = from
        .iter()
        .map(|vector| {
            against
                .iter()
                .map(|other| cosine_similarity(vector, other))
                .fold(0.0f64, f64::max)
                .clamp(0.0, 1.0)
        })
        .sum();
    total / from.len() as f64
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ragscore_core::error::Result;
    use ragscore_embeddings::{EmbeddingProvider, MockEmbeddingProvider};
    use std::sync::Arc;

    fn mock_manager() -> EmbeddingManager {
        EmbeddingManager::new(Arc::new(MockEmbeddingProvider::new(32)), "mock".to_string())
    }

    /// Stub with hand-picked vectors so similarities are exactly known.
    struct StaticEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StaticEmbedder {
        async fn embed(&self, texts: Vec<String>) -> Result<Vec<Option<Vec<f32>>>> {
            Ok(texts
                .into_iter()
                .map(|t| {
                    Some(match t.as_str() {
                        "force" => vec![1.0, 0.0],
                        "mass" => vec![0.0, 1.0],
                        // halfway between force and mass
                        "weight" => vec![1.0, 1.0],
                        _ => vec![-1.0, -1.0],
                    })
                })
                .collect())
        }

        fn embedding_dimension(&self) -> usize {
            2
        }

        fn max_text_length(&self) -> usize {
            512
        }
    }

    fn static_manager() -> EmbeddingManager {
        EmbeddingManager::new(Arc::new(StaticEmbedder), "static".to_string())
    }

    #[tokio::test]
    async fn test_identity_scores_one() {
        let text = "newton first law of motion";
        let score = bertscore(text, text, &mock_manager()).await.unwrap();
        assert!((score.precision - 1.0).abs() < 1e-5);
        assert!((score.recall - 1.0).abs() < 1e-5);
        assert!((score.f1 - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_empty_inputs_score_zero() {
        let manager = mock_manager();
        assert_eq!(
            bertscore("", "reference", &manager).await.unwrap(),
            BertScore::default()
        );
        assert_eq!(
            bertscore("response", "", &manager).await.unwrap(),
            BertScore::default()
        );
    }

    #[tokio::test]
    async fn test_orthogonal_tokens_score_zero() {
        let score = bertscore("force", "mass", &static_manager()).await.unwrap();
        assert!(score.precision.abs() < 1e-6);
        assert!(score.recall.abs() < 1e-6);
        assert_eq!(score.f1, 0.0);
    }

    #[tokio::test]
    async fn test_partial_similarity() {
        // cos(weight, force) = 1/sqrt(2)
        let score = bertscore("weight", "force", &static_manager())
            .await
            .unwrap();
        let expected = 1.0 / 2.0f64.sqrt();
        assert!((score.precision - expected).abs() < 1e-6);
        assert!((score.recall - expected).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_precision_and_recall_are_asymmetric() {
        // Response covers one of two reference tokens: precision is perfect,
        // recall is not.
        let score = bertscore("force", "force mass", &static_manager())
            .await
            .unwrap();
        assert!((score.precision - 1.0).abs() < 1e-6);
        assert!((score.recall - 0.5).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_scores_bounded() {
        let manager = mock_manager();
        for (response, reference) in [
            ("force equals mass", "mass equals force"),
            ("one two three", "four five six"),
            ("repeated repeated", "repeated"),
        ] {
            let score = bertscore(response, reference, &manager).await.unwrap();
            for value in [score.precision, score.recall, score.f1] {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }
}
