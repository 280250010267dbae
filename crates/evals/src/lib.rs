//! Evaluation metrics and reporting for RAG pipelines
//!
//! This crate provides:
//! - Rank-based retrieval metrics (MRR, Hit@k, Precision@k)
//! - Overlap-based generation metrics (faithfulness, relevancy)
//! - Reference-based generation metrics (ROUGE-L, BLEU, BERTScore)
//! - The evaluator that composes them per query and reduces a batch into an
//!   aggregate report with deterministic table rendering
//!
//! Retrieval and generation scoring are pure given their inputs; the only
//! external dependency is the injected embedding capability behind
//! BERTScore, which can be replaced with a deterministic stub in tests.

pub mod bertscore;
pub mod bleu;
pub mod generation;
pub mod report;
pub mod retrieval;
pub mod rouge;
mod stats;

pub use bertscore::{bertscore, BertScore};
pub use bleu::bleu;
pub use generation::{GenerationMetrics, GroundingScorer, LexicalOverlapScorer};
pub use report::{interpretation, metric, Evaluator, ScoreBand};
pub use rouge::{rouge_l, RougeScore};
