//! Trait definition for embedding providers

use async_trait::async_trait;
use ragscore_core::error::Result;

/// Trait for token-embedding providers
///
/// This trait defines the interface the BERTScore matcher depends on. The
/// matching algorithm is independent of which embedding model sits behind it,
/// so a deterministic stub can be substituted in tests.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embeddings for a list of texts (typically single tokens)
    ///
    /// # Arguments
    /// * `texts` - List of text strings to embed
    ///
    /// # Returns
    /// A vector of optional embedding vectors, one per input text, in input
    /// order. `None` marks a text the provider skipped (e.g. over the length
    /// limit).
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Option<Vec<f32>>>>;

    /// Get the embedding dimension
    fn embedding_dimension(&self) -> usize;

    /// Get the maximum text length supported, in characters
    fn max_text_length(&self) -> usize;
}
