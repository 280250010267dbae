//! Token-embedding generation for reference-based evaluation metrics
//!
//! This crate provides the injected embedding capability consumed by the
//! BERTScore matcher: an OpenAI-compatible remote provider and a
//! deterministic mock for tests.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use ragscore_core::error::{Result, ResultExt};
use std::sync::Arc;

mod api_provider;
pub mod config;
pub mod error;
mod mock_provider;
pub mod provider;

pub use api_provider::create_api_provider;
pub use config::{EmbeddingConfig, EmbeddingConfigBuilder, EmbeddingProviderType};
pub use error::EmbeddingError;
pub use mock_provider::MockEmbeddingProvider;
pub use provider::EmbeddingProvider;

/// Manager for handling embedding generation with immutable configuration
pub struct EmbeddingManager {
    provider: Arc<dyn EmbeddingProvider>,
    model_version: String,
}

impl EmbeddingManager {
    /// Creates a new embedding manager with the specified provider and model version
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model_version: String) -> Self {
        Self {
            provider,
            model_version,
        }
    }

    /// Initialize manager from configuration
    pub async fn from_config(config: EmbeddingConfig) -> Result<Self> {
        let model_version = config.model.clone();

        let provider = match config.provider {
            EmbeddingProviderType::Api => {
                let provider = create_api_provider(config)
                    .await
                    .context("Failed to create API embedding provider")?;
                Arc::from(provider)
            }
            EmbeddingProviderType::Mock => {
                let provider = MockEmbeddingProvider::new(config.embedding_dimension);
                Arc::new(provider) as Arc<dyn EmbeddingProvider>
            }
        };

        Ok(Self {
            provider,
            model_version,
        })
    }

    /// Get reference to the embedding provider
    pub fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    /// Get the model version string for reporting
    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// The dimension of vectors produced by the underlying provider
    pub fn embedding_dimension(&self) -> usize {
        self.provider.embedding_dimension()
    }

    /// Generate embeddings for texts
    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Option<Vec<f32>>>> {
        self.provider.embed(texts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manager_from_mock_config() {
        let config = EmbeddingConfigBuilder::new()
            .provider(EmbeddingProviderType::Mock)
            .model("mock-model")
            .embedding_dimension(8)
            .build();

        let manager = EmbeddingManager::from_config(config).await.unwrap();
        assert_eq!(manager.model_version(), "mock-model");
        assert_eq!(manager.embedding_dimension(), 8);

        let embeddings = manager
            .embed(vec!["force".to_string(), "mass".to_string()])
            .await
            .unwrap();
        assert_eq!(embeddings.len(), 2);
        assert!(embeddings.iter().all(|e| e.is_some()));
    }
}
