//! Mock embedding provider for testing

use crate::provider::EmbeddingProvider;
use async_trait::async_trait;
use ragscore_core::error::Result;

/// Mock embedding provider that returns deterministic embeddings
///
/// Each text is hashed into a unit vector, so identical texts always embed
/// identically (cosine 1.0) and distinct texts land in distinct directions.
/// This keeps cosine-based matching well-defined without a real model.
pub struct MockEmbeddingProvider {
    embedding_dim: usize,
}

impl MockEmbeddingProvider {
    /// Create a new mock provider with the specified embedding dimension
    pub fn new(embedding_dim: usize) -> Self {
        Self { embedding_dim }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        // FNV-1a seed from the text, then xorshift to fill the vector
        let mut state: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in text.as_bytes() {
            state ^= u64::from(*byte);
            state = state.wrapping_mul(0x0000_0100_0000_01b3);
        }
        if state == 0 {
            state = 1;
        }

        let mut vector = Vec::with_capacity(self.embedding_dim);
        for _ in 0..self.embedding_dim {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            // Map to [-1, 1]
            let value = (state as f64 / u64::MAX as f64) * 2.0 - 1.0;
            vector.push(value as f32);
        }

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Option<Vec<f32>>>> {
        Ok(texts
            .into_iter()
            .map(|text| Some(self.embed_one(&text)))
            .collect())
    }

    fn embedding_dimension(&self) -> usize {
        self.embedding_dim
    }

    fn max_text_length(&self) -> usize {
        512
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_embeddings_are_deterministic() {
        let provider = MockEmbeddingProvider::new(16);
        let first = provider.embed(vec!["force".to_string()]).await.unwrap();
        let second = provider.embed(vec!["force".to_string()]).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_mock_embeddings_are_unit_vectors() {
        let provider = MockEmbeddingProvider::new(16);
        let result = provider.embed(vec!["energy".to_string()]).await.unwrap();
        let vector = result[0].as_ref().unwrap();
        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_distinct_texts_embed_differently() {
        let provider = MockEmbeddingProvider::new(16);
        let result = provider
            .embed(vec!["force".to_string(), "banana".to_string()])
            .await
            .unwrap();
        assert_ne!(result[0], result[1]);
    }
}
