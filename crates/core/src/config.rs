//! Configuration for evaluation runs

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for a single evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Cutoff for Hit@k and Precision@k (MRR always uses the full list)
    pub retrieval_k: usize,
    /// Whether to compute reference-based metrics (BERTScore, ROUGE-L, BLEU)
    pub include_advanced: bool,
    /// Maximum number of queries evaluated concurrently
    pub max_concurrent: usize,
    /// Per-query time budget for the advanced metrics block, in seconds
    pub advanced_timeout_secs: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            retrieval_k: 10,
            include_advanced: false,
            max_concurrent: 4,
            advanced_timeout_secs: 60,
        }
    }
}

impl EvalConfig {
    /// The advanced-metrics time budget as a `Duration`.
    pub fn advanced_timeout(&self) -> Duration {
        Duration::from_secs(self.advanced_timeout_secs)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.retrieval_k == 0 {
            return Err("retrieval_k must be greater than 0".to_string());
        }
        if self.max_concurrent == 0 {
            return Err("max_concurrent must be greater than 0".to_string());
        }
        if self.max_concurrent > 32 {
            return Err("max_concurrent too large (max 32)".to_string());
        }
        if self.advanced_timeout_secs == 0 {
            return Err("advanced_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
