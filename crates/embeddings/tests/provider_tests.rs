//! Integration tests for the embedding provider surface

use ragscore_embeddings::{
    EmbeddingConfigBuilder, EmbeddingManager, EmbeddingProvider, EmbeddingProviderType,
    MockEmbeddingProvider,
};
use std::sync::Arc;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na * nb)
}

#[tokio::test]
async fn test_identical_tokens_have_cosine_one() {
    let provider = MockEmbeddingProvider::new(32);
    let embeddings = provider
        .embed(vec!["inertia".to_string(), "inertia".to_string()])
        .await
        .unwrap();

    let a = embeddings[0].as_ref().unwrap();
    let b = embeddings[1].as_ref().unwrap();
    assert!((cosine(a, b) - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_embeddings_preserve_input_order() {
    let provider = MockEmbeddingProvider::new(16);
    let tokens = vec![
        "newton".to_string(),
        "first".to_string(),
        "law".to_string(),
    ];
    let embeddings = provider.embed(tokens.clone()).await.unwrap();
    assert_eq!(embeddings.len(), 3);

    // Re-embedding each token individually must match the batch result
    for (token, batch_embedding) in tokens.into_iter().zip(&embeddings) {
        let single = provider.embed(vec![token]).await.unwrap();
        assert_eq!(single[0], *batch_embedding);
    }
}

#[tokio::test]
async fn test_manager_behind_trait_object() {
    let provider: Arc<dyn EmbeddingProvider> = Arc::new(MockEmbeddingProvider::new(8));
    let manager = EmbeddingManager::new(provider, "stub-v1".to_string());

    assert_eq!(manager.model_version(), "stub-v1");
    let embeddings = manager.embed(vec!["work".to_string()]).await.unwrap();
    assert_eq!(embeddings[0].as_ref().unwrap().len(), 8);
}

#[tokio::test]
async fn test_empty_input_yields_empty_output() {
    let config = EmbeddingConfigBuilder::new()
        .provider(EmbeddingProviderType::Mock)
        .embedding_dimension(8)
        .build();
    let manager = EmbeddingManager::from_config(config).await.unwrap();

    let embeddings = manager.embed(Vec::new()).await.unwrap();
    assert!(embeddings.is_empty());
}
