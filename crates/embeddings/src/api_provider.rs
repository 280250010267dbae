//! OpenAI-compatible API provider for token embeddings (vLLM, OpenAI, etc.)

use crate::{config::EmbeddingConfig, error::EmbeddingError, provider::EmbeddingProvider};
use async_openai::types::{CreateEmbeddingRequest, EmbeddingInput};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use ragscore_core::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Maximum characters per individual text. Texts above this are skipped and
/// reported as `None` rather than sent to the model.
const MAX_TEXT_CHARS: usize = 512;

/// OpenAI-compatible API provider
pub struct OpenAiApiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    dimensions: usize,
    batch_size: usize,
    max_concurrent: usize,
    concurrency_limiter: Arc<Semaphore>,
    retry_attempts: usize,
}

impl OpenAiApiProvider {
    /// Create a new API provider from configuration
    pub(crate) async fn new(config: EmbeddingConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| EmbeddingError::ModelLoadError(format!("Invalid configuration: {e}")))?;

        info!("Initializing OpenAI-compatible API embeddings");
        info!("  Model: {}", config.model);
        info!("  Dimensions: {}", config.embedding_dimension);
        info!("  Batch size: {}", config.batch_size);
        info!(
            "  Max concurrent requests: {}",
            config.max_concurrent_requests
        );

        let base_url = config
            .api_base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:8000/v1".to_string());

        info!("  Base URL: {}", base_url);

        let mut openai_config = OpenAIConfig::new().with_api_base(&base_url);
        if let Some(ref api_key) = config.api_key {
            openai_config = openai_config.with_api_key(api_key);
        }

        let client = Client::with_config(openai_config);

        // Health check warns on failure but does not block construction;
        // actual embed calls surface ModelUnavailable if the backend is down.
        Self::check_health(&client).await;

        Ok(Self {
            client,
            model: config.model,
            dimensions: config.embedding_dimension,
            batch_size: config.batch_size,
            max_concurrent: config.max_concurrent_requests,
            concurrency_limiter: Arc::new(Semaphore::new(config.max_concurrent_requests)),
            retry_attempts: config.retry_attempts,
        })
    }

    /// Check if the API is healthy (non-blocking, warns on failure)
    async fn check_health(client: &Client<OpenAIConfig>) {
        debug!("Checking API health via /v1/models endpoint");

        match client.models().list().await {
            Ok(models_response) => {
                info!("API health check passed");
                debug!("  Available models: {}", models_response.data.len());
            }
            Err(e) => {
                warn!("API health check failed: {e}");
                warn!("  The embedding service may not be running or still starting up.");
            }
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiApiProvider {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Option<Vec<f32>>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_embeddings = vec![None; texts.len()];

        // Filter out oversized texts, keeping original indices
        let mut accepted: Vec<(usize, String)> = Vec::new();
        let mut skipped_count = 0;

        for (i, text) in texts.into_iter().enumerate() {
            if text.chars().count() <= MAX_TEXT_CHARS {
                accepted.push((i, text));
            } else {
                skipped_count += 1;
                debug!("Text at index {i} exceeds {MAX_TEXT_CHARS} chars, skipping");
            }
        }

        if skipped_count > 0 {
            warn!("Skipped {skipped_count} texts exceeding {MAX_TEXT_CHARS} chars");
        }

        if accepted.is_empty() {
            return Ok(all_embeddings);
        }

        let batches: Vec<Vec<(usize, String)>> = accepted
            .chunks(self.batch_size)
            .map(|chunk| chunk.to_vec())
            .collect();

        debug!(
            "Created {} batches (batch_size={})",
            batches.len(),
            self.batch_size
        );

        let results = stream::iter(batches)
            .map(|batch| {
                let limiter = self.concurrency_limiter.clone();
                let client = self.client.clone();
                let model = self.model.clone();
                let dimensions = self.dimensions;
                let retry_attempts = self.retry_attempts;

                async move {
                    let (indices, batch_texts): (Vec<usize>, Vec<String>) =
                        batch.into_iter().unzip();

                    let _permit = limiter.acquire_owned().await.map_err(|e| {
                        EmbeddingError::InferenceError(format!(
                            "Failed to acquire concurrency permit: {e}"
                        ))
                    })?;

                    let mut attempt = 0;

                    loop {
                        let request = CreateEmbeddingRequest {
                            model: model.clone(),
                            input: EmbeddingInput::StringArray(batch_texts.clone()),
                            encoding_format: None,
                            dimensions: None,
                            user: None,
                        };

                        match client.embeddings().create(request).await {
                            Ok(response) => {
                                let mut sorted: Vec<(usize, Vec<f32>)> = response
                                    .data
                                    .into_iter()
                                    .map(|emb| (emb.index as usize, emb.embedding))
                                    .collect();
                                sorted.sort_by_key(|(idx, _)| *idx);

                                for (_, embedding) in &sorted {
                                    if embedding.len() != dimensions {
                                        return Err(EmbeddingError::DimensionMismatch {
                                            expected: dimensions,
                                            got: embedding.len(),
                                        });
                                    }
                                }

                                let pairs: Vec<(usize, Vec<f32>)> = indices
                                    .into_iter()
                                    .zip(sorted.into_iter().map(|(_, emb)| emb))
                                    .collect();

                                return Ok::<_, EmbeddingError>(pairs);
                            }
                            Err(e) if attempt < retry_attempts => {
                                attempt += 1;
                                // Exponential backoff: 1s, 2s, 4s (capped at 30s)
                                let backoff_secs = (1u64 << (attempt - 1)).min(30);
                                warn!(
                                    "Embedding request failed ({e}), retrying in {backoff_secs}s \
                                     (attempt {attempt}/{retry_attempts})"
                                );
                                tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                            }
                            Err(e) => {
                                return Err(EmbeddingError::InferenceError(format!(
                                    "API request failed after {retry_attempts} attempts: {e}"
                                )));
                            }
                        }
                    }
                }
            })
            .buffer_unordered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        for result in results {
            let batch_pairs =
                result.map_err(|e: EmbeddingError| -> ragscore_core::error::Error { e.into() })?;
            for (orig_idx, embedding) in batch_pairs {
                all_embeddings[orig_idx] = Some(embedding);
            }
        }

        Ok(all_embeddings)
    }

    fn embedding_dimension(&self) -> usize {
        self.dimensions
    }

    fn max_text_length(&self) -> usize {
        MAX_TEXT_CHARS
    }
}

/// Create a new OpenAI-compatible API provider from configuration
pub async fn create_api_provider(config: EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    let provider = OpenAiApiProvider::new(config).await?;
    Ok(Box::new(provider))
}
