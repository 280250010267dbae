//! Core types and utilities for the ragscore evaluation engine
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - **Types**: per-query inputs and results (query records, retrieved
//!   documents, evaluation results, aggregate reports)
//! - **Dataset**: an immutable, ordered collection of query records
//! - **Configuration**: evaluation settings with validation
//! - **Text utilities**: normalization and tokenization shared by all
//!   lexical metrics
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod dataset;
pub mod error;
pub mod text;
pub mod types;

// Re-export main types for convenience
pub use config::EvalConfig;
pub use dataset::QueryDataset;
pub use error::{Error, Result, ResultExt};
pub use types::{
    AdvancedScores, AggregateReport, EvaluationResult, MetricSummary, PipelineOutput, QueryRecord,
    RetrievalScores, RetrievedDoc,
};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::EvalConfig;
    pub use crate::dataset::QueryDataset;
    pub use crate::error::{Result, ResultExt};
    pub use crate::types::{EvaluationResult, PipelineOutput, QueryRecord, RetrievedDoc};
}
