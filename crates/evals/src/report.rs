//! Per-query evaluation, aggregation, and report rendering
//!
//! The evaluator composes the retrieval and generation metrics into one
//! result per query, runs the query set with bounded concurrency, and
//! reduces completed results into aggregate statistics. Rendering produces
//! deterministic strings; writing them to a stream is the caller's concern.

use crate::bertscore::bertscore;
use crate::bleu::bleu;
use crate::generation::GenerationMetrics;
use crate::retrieval;
use crate::rouge::rouge_l;
use crate::stats::{mean, sample_stddev};
use futures::stream::{self, StreamExt};
use ragscore_core::config::EvalConfig;
use ragscore_core::dataset::QueryDataset;
use ragscore_core::error::{Error, Result};
use ragscore_core::types::{
    AdvancedScores, AggregateReport, EvaluationResult, MetricSummary, PipelineOutput, QueryRecord,
};
use ragscore_embeddings::{EmbeddingConfig, EmbeddingManager};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Metric names used as keys in [`AggregateReport::stats`] and in rendering.
pub mod metric {
    pub const MRR: &str = "mrr";
    pub const FAITHFULNESS: &str = "faithfulness";
    pub const RELEVANCY: &str = "relevancy";
    pub const RESPONSE_LENGTH: &str = "response_length";
    pub const BERTSCORE_PRECISION: &str = "bertscore_precision";
    pub const BERTSCORE_RECALL: &str = "bertscore_recall";
    pub const BERTSCORE_F1: &str = "bertscore_f1";
    pub const ROUGE_L_PRECISION: &str = "rouge_l_precision";
    pub const ROUGE_L_RECALL: &str = "rouge_l_recall";
    pub const ROUGE_L_F1: &str = "rouge_l_f1";
    pub const BLEU: &str = "bleu";

    /// Key for Hit@k at the configured cutoff, e.g. "hit@10".
    pub fn hit(k: usize) -> String {
        format!("hit@{k}")
    }

    /// Key for Precision@k at the configured cutoff, e.g. "precision@10".
    pub fn precision(k: usize) -> String {
        format!("precision@{k}")
    }
}

/// Qualitative band for an aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::NeedsImprovement => write!(f, "Needs improvement"),
        }
    }
}

fn band(value: f64, excellent: f64, good: f64) -> ScoreBand {
    if value >= excellent {
        ScoreBand::Excellent
    } else if value >= good {
        ScoreBand::Good
    } else {
        ScoreBand::NeedsImprovement
    }
}

/// Stateless evaluation engine for a query set.
///
/// The evaluator holds only its configuration, scoring strategies, and the
/// optional embedding backend; no state persists between calls.
pub struct Evaluator {
    config: EvalConfig,
    embeddings: Option<Arc<EmbeddingManager>>,
    generation: GenerationMetrics,
}

impl Evaluator {
    /// Evaluator computing standard metrics only.
    pub fn new(config: EvalConfig) -> Result<Self> {
        config.validate().map_err(Error::config)?;
        Ok(Self {
            config,
            embeddings: None,
            generation: GenerationMetrics::new(),
        })
    }

    /// Evaluator with an already-initialized embedding backend.
    pub fn with_embeddings(config: EvalConfig, embeddings: Arc<EmbeddingManager>) -> Result<Self> {
        config.validate().map_err(Error::config)?;
        Ok(Self {
            config,
            embeddings: Some(embeddings),
            generation: GenerationMetrics::new(),
        })
    }

    /// Build an evaluator, initializing the embedding backend when advanced
    /// metrics are requested.
    ///
    /// A backend that fails to initialize degrades the whole run: the
    /// failure is logged once, every query proceeds with standard metrics
    /// only, and advanced metrics are uniformly unavailable.
    pub async fn from_config(config: EvalConfig, embedding_config: EmbeddingConfig) -> Result<Self> {
        config.validate().map_err(Error::config)?;

        if !config.include_advanced {
            return Self::new(config);
        }

        match EmbeddingManager::from_config(embedding_config).await {
            Ok(manager) => {
                info!(
                    "Embedding backend ready: {} ({} dims)",
                    manager.model_version(),
                    manager.embedding_dimension()
                );
                Self::with_embeddings(config, Arc::new(manager))
            }
            Err(e) => {
                warn!("Embedding backend unavailable, advanced metrics disabled for this run: {e}");
                Self::new(config)
            }
        }
    }

    /// Replace the default grounding/relevancy scoring strategies.
    pub fn with_generation_metrics(mut self, generation: GenerationMetrics) -> Self {
        self.generation = generation;
        self
    }

    /// Whether advanced metrics can be computed in this run.
    pub fn advanced_enabled(&self) -> bool {
        self.config.include_advanced && self.embeddings.is_some()
    }

    /// The configuration this evaluator runs with.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate one query against its pipeline output.
    ///
    /// Individual metric failures are recorded as unavailable in the result;
    /// only a malformed retrieved list marks the retrieval block failed. The
    /// advanced block additionally runs under the configured time budget.
    pub async fn evaluate_query(
        &self,
        query: &QueryRecord,
        output: &PipelineOutput,
    ) -> EvaluationResult {
        debug!("Evaluating query {}", query.id);

        let retrieval = match retrieval::scores(&output.retrieved, self.config.retrieval_k) {
            Ok(scores) => Some(scores),
            Err(e) => {
                warn!("Query {}: retrieval metrics unavailable: {e}", query.id);
                None
            }
        };

        let faithfulness = Some(self.generation.faithfulness(&output.response, &output.context));
        let relevancy = Some(self.generation.relevancy(&output.response, &query.text));
        let response_length = GenerationMetrics::response_length(&output.response);

        let advanced = match (&self.embeddings, query.reference_answer.as_deref()) {
            (Some(manager), Some(reference)) if self.config.include_advanced => {
                let budget = self.config.advanced_timeout();
                match tokio::time::timeout(
                    budget,
                    self.advanced_scores(&output.response, reference, manager),
                )
                .await
                {
                    Ok(Ok(scores)) => Some(scores),
                    Ok(Err(e)) => {
                        warn!("Query {}: advanced metrics unavailable: {e}", query.id);
                        None
                    }
                    Err(_) => {
                        warn!(
                            "Query {}: advanced metrics timed out after {budget:?}",
                            query.id
                        );
                        None
                    }
                }
            }
            _ => None,
        };

        EvaluationResult {
            query_id: query.id.clone(),
            retrieval,
            faithfulness,
            relevancy,
            response_length,
            advanced,
        }
    }

    async fn advanced_scores(
        &self,
        response: &str,
        reference: &str,
        manager: &EmbeddingManager,
    ) -> Result<AdvancedScores> {
        let rouge = rouge_l(response, reference);
        let bleu_score = bleu(response, reference);
        let bert = bertscore(response, reference, manager).await?;

        Ok(AdvancedScores {
            bertscore_precision: bert.precision,
            bertscore_recall: bert.recall,
            bertscore_f1: bert.f1,
            rouge_l_precision: rouge.precision,
            rouge_l_recall: rouge.recall,
            rouge_l_f1: rouge.f1,
            bleu: bleu_score,
        })
    }

    /// Evaluate every dataset query with bounded concurrency, then aggregate.
    ///
    /// Per-query evaluation is embarrassingly parallel: each future reads
    /// only its own arguments. Aggregation is a barrier: it runs only after
    /// every scheduled evaluation has completed. Results keep dataset order.
    pub async fn evaluate_batch(
        &self,
        dataset: &QueryDataset,
        outputs: &[PipelineOutput],
    ) -> Result<AggregateReport> {
        if dataset.is_empty() {
            return Err(Error::aggregation("dataset holds no queries"));
        }

        let by_id: HashMap<&str, &PipelineOutput> = outputs
            .iter()
            .map(|output| (output.query_id.as_str(), output))
            .collect();

        for output in outputs {
            if dataset.get(&output.query_id).is_none() {
                warn!(
                    "Pipeline output for unknown query {} ignored",
                    output.query_id
                );
            }
        }

        let mut pairs: Vec<(&QueryRecord, &PipelineOutput)> = Vec::new();
        for query in dataset.iter() {
            match by_id.get(query.id.as_str()) {
                Some(output) => pairs.push((query, *output)),
                None => warn!("No pipeline output for query {}, skipping", query.id),
            }
        }

        if pairs.is_empty() {
            return Err(Error::aggregation(
                "no evaluable queries: every dataset query lacked a pipeline output",
            ));
        }

        info!(
            "Evaluating {} queries (max {} concurrent, advanced: {})",
            pairs.len(),
            self.config.max_concurrent,
            self.advanced_enabled()
        );

        let results: Vec<EvaluationResult> = stream::iter(pairs)
            .map(|(query, output)| self.evaluate_query(query, output))
            .buffered(self.config.max_concurrent)
            .collect()
            .await;

        self.aggregate(results)
    }

    /// Reduce completed per-query results into aggregate statistics.
    ///
    /// Each metric is summarized over the subset of queries where it was
    /// present; metrics with zero present values are omitted entirely.
    pub fn aggregate(&self, results: Vec<EvaluationResult>) -> Result<AggregateReport> {
        if results.is_empty() {
            return Err(Error::aggregation("cannot aggregate an empty result set"));
        }

        let k = self.config.retrieval_k;
        let mut stats = BTreeMap::new();

        let mut summarize = |name: String, values: Vec<f64>| {
            if !values.is_empty() {
                stats.insert(
                    name,
                    MetricSummary {
                        mean: mean(&values),
                        stddev: sample_stddev(&values),
                        count: values.len(),
                    },
                );
            }
        };

        summarize(
            metric::MRR.to_string(),
            collect_values(&results, |r| r.retrieval.map(|s| s.mrr)),
        );
        summarize(
            metric::hit(k),
            collect_values(&results, |r| r.retrieval.map(|s| s.hit_at_k)),
        );
        summarize(
            metric::precision(k),
            collect_values(&results, |r| r.retrieval.map(|s| s.precision_at_k)),
        );
        summarize(
            metric::FAITHFULNESS.to_string(),
            collect_values(&results, |r| r.faithfulness),
        );
        summarize(
            metric::RELEVANCY.to_string(),
            collect_values(&results, |r| r.relevancy),
        );
        summarize(
            metric::RESPONSE_LENGTH.to_string(),
            collect_values(&results, |r| Some(r.response_length as f64)),
        );
        summarize(
            metric::BERTSCORE_PRECISION.to_string(),
            collect_values(&results, |r| r.advanced.map(|a| a.bertscore_precision)),
        );
        summarize(
            metric::BERTSCORE_RECALL.to_string(),
            collect_values(&results, |r| r.advanced.map(|a| a.bertscore_recall)),
        );
        summarize(
            metric::BERTSCORE_F1.to_string(),
            collect_values(&results, |r| r.advanced.map(|a| a.bertscore_f1)),
        );
        summarize(
            metric::ROUGE_L_PRECISION.to_string(),
            collect_values(&results, |r| r.advanced.map(|a| a.rouge_l_precision)),
        );
        summarize(
            metric::ROUGE_L_RECALL.to_string(),
            collect_values(&results, |r| r.advanced.map(|a| a.rouge_l_recall)),
        );
        summarize(
            metric::ROUGE_L_F1.to_string(),
            collect_values(&results, |r| r.advanced.map(|a| a.rouge_l_f1)),
        );
        summarize(
            metric::BLEU.to_string(),
            collect_values(&results, |r| r.advanced.map(|a| a.bleu)),
        );

        Ok(AggregateReport {
            per_query: results,
            stats,
        })
    }

    /// Render the standard results table.
    ///
    /// One row per query in dataset order plus a trailing AVERAGE row;
    /// numeric cells to 4 decimal places, lengths as integers, unavailable
    /// metrics as "N/A". Deterministic for identical input.
    pub fn format_table(&self, report: &AggregateReport) -> String {
        let k = self.config.retrieval_k;
        let hit_key = metric::hit(k);

        let mut out = String::new();
        let heavy = "=".repeat(100);
        let thin = "-".repeat(100);

        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(out, "EVALUATION RESULTS - RAG PIPELINE PERFORMANCE");
        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(
            out,
            "{:<12} {:<10} {:<10} {:<15} {:<15} {:<10}",
            "Query ID",
            "MRR",
            format!("Hit@{k}"),
            "Faithfulness",
            "Relevancy",
            "Length"
        );
        let _ = writeln!(out, "{thin}");

        for result in &report.per_query {
            let _ = writeln!(
                out,
                "{:<12} {:<10} {:<10} {:<15} {:<15} {:<10}",
                result.query_id,
                fmt_cell(result.retrieval.map(|s| s.mrr)),
                fmt_cell(result.retrieval.map(|s| s.hit_at_k)),
                fmt_cell(result.faithfulness),
                fmt_cell(result.relevancy),
                result.response_length
            );
        }

        let _ = writeln!(out, "{thin}");
        let _ = writeln!(
            out,
            "{:<12} {:<10} {:<10} {:<15} {:<15} {:<10}",
            "AVERAGE",
            fmt_mean(report, metric::MRR),
            fmt_mean(report, &hit_key),
            fmt_mean(report, metric::FAITHFULNESS),
            fmt_mean(report, metric::RELEVANCY),
            fmt_mean_integer(report, metric::RESPONSE_LENGTH)
        );
        let _ = writeln!(out, "{heavy}");

        out
    }

    /// Render the advanced-metrics table, or `None` when no result carries
    /// advanced scores (e.g. the backend was unavailable for the whole run).
    pub fn format_advanced_table(&self, report: &AggregateReport) -> Option<String> {
        if !report.has_advanced() {
            return None;
        }

        let mut out = String::new();
        let heavy = "=".repeat(120);
        let thin = "-".repeat(120);

        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(out, "ADVANCED METRICS - NLG EVALUATION");
        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(
            out,
            "{:<12} {:<15} {:<15} {:<10} {:<15} {:<15}",
            "Query ID", "BERTScore F1", "ROUGE-L F1", "BLEU", "Faithfulness", "Relevancy"
        );
        let _ = writeln!(out, "{thin}");

        for result in &report.per_query {
            let _ = writeln!(
                out,
                "{:<12} {:<15} {:<15} {:<10} {:<15} {:<15}",
                result.query_id,
                fmt_cell(result.advanced.map(|a| a.bertscore_f1)),
                fmt_cell(result.advanced.map(|a| a.rouge_l_f1)),
                fmt_cell(result.advanced.map(|a| a.bleu)),
                fmt_cell(result.faithfulness),
                fmt_cell(result.relevancy)
            );
        }

        let _ = writeln!(out, "{thin}");
        let _ = writeln!(
            out,
            "{:<12} {:<15} {:<15} {:<10} {:<15} {:<15}",
            "AVERAGE",
            fmt_mean(report, metric::BERTSCORE_F1),
            fmt_mean(report, metric::ROUGE_L_F1),
            fmt_mean(report, metric::BLEU),
            fmt_mean(report, metric::FAITHFULNESS),
            fmt_mean(report, metric::RELEVANCY)
        );
        let _ = writeln!(out, "{heavy}");

        let _ = writeln!(out, "ADVANCED METRIC STATISTICS");
        for (label, key) in [
            ("BERTScore F1", metric::BERTSCORE_F1),
            ("ROUGE-L F1", metric::ROUGE_L_F1),
            ("BLEU", metric::BLEU),
        ] {
            match report.summary(key) {
                Some(summary) => {
                    let _ = writeln!(
                        out,
                        "  {label:<14} {:.4} \u{b1} {:.4} (n={})",
                        summary.mean, summary.stddev, summary.count
                    );
                }
                None => {
                    let _ = writeln!(out, "  {label:<14} N/A");
                }
            }
        }

        out.push('\n');
        Some(out)
    }

    /// Render the full report: standard table, advanced table when present.
    pub fn render(&self, report: &AggregateReport) -> String {
        let mut out = self.format_table(report);
        if let Some(advanced) = self.format_advanced_table(report) {
            out.push('\n');
            out.push_str(&advanced);
        }
        out
    }
}

/// Qualitative interpretation of the aggregate scores, one line per banded
/// metric. Metrics absent from the report are skipped.
pub fn interpretation(report: &AggregateReport) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(summary) = report.summary(metric::FAITHFULNESS) {
        let verdict = match band(summary.mean, 0.7, 0.5) {
            ScoreBand::Excellent => "responses are well grounded in the retrieved context",
            ScoreBand::Good => "some responses may include unsupported information",
            ScoreBand::NeedsImprovement => "responses often stray from the retrieved context",
        };
        lines.push(format!(
            "FAITHFULNESS: {} - {verdict}",
            band(summary.mean, 0.7, 0.5)
        ));
    }

    if let Some(summary) = report.summary(metric::RELEVANCY) {
        let verdict = match band(summary.mean, 0.6, 0.4) {
            ScoreBand::Excellent => "responses directly address the queries",
            ScoreBand::Good => "responses mostly address the queries",
            ScoreBand::NeedsImprovement => "responses frequently miss the query intent",
        };
        lines.push(format!(
            "RELEVANCY: {} - {verdict}",
            band(summary.mean, 0.6, 0.4)
        ));
    }

    if let Some(summary) = report.summary(metric::MRR) {
        let verdict = match band(summary.mean, 0.7, 0.5) {
            ScoreBand::Excellent => "relevant documents rank near the top",
            ScoreBand::Good => "relevant documents usually rank in the upper half",
            ScoreBand::NeedsImprovement => "relevant documents rank too low",
        };
        lines.push(format!("MRR: {} - {verdict}", band(summary.mean, 0.7, 0.5)));
    }

    lines
}

fn collect_values(
    results: &[EvaluationResult],
    extract: impl Fn(&EvaluationResult) -> Option<f64>,
) -> Vec<f64> {
    results.iter().filter_map(extract).collect()
}

fn fmt_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "N/A".to_string(),
    }
}

fn fmt_mean(report: &AggregateReport, key: &str) -> String {
    fmt_cell(report.summary(key).map(|s| s.mean))
}

fn fmt_mean_integer(report: &AggregateReport, key: &str) -> String {
    match report.summary(key) {
        Some(summary) => format!("{:.0}", summary.mean),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ragscore_core::types::RetrievalScores;

    fn evaluator() -> Evaluator {
        Evaluator::new(EvalConfig::default()).unwrap()
    }

    fn standard_result(
        query_id: &str,
        mrr: f64,
        hit: f64,
        faithfulness: f64,
        relevancy: f64,
    ) -> EvaluationResult {
        EvaluationResult {
            query_id: query_id.to_string(),
            retrieval: Some(RetrievalScores {
                mrr,
                hit_at_k: hit,
                precision_at_k: 0.1,
            }),
            faithfulness: Some(faithfulness),
            relevancy: Some(relevancy),
            response_length: 100,
            advanced: None,
        }
    }

    #[test]
    fn test_aggregate_two_query_batch() {
        let results = vec![
            standard_result("Q1", 1.0, 1.0, 0.85, 0.72),
            standard_result("Q2", 0.5, 1.0, 0.78, 0.81),
        ];
        let report = evaluator().aggregate(results).unwrap();

        let mrr = report.summary(metric::MRR).unwrap();
        assert!((mrr.mean - 0.75).abs() < 1e-12);
        assert!((mrr.stddev - 0.3536).abs() < 1e-4);
        assert_eq!(mrr.count, 2);

        let hit = report.summary(&metric::hit(10)).unwrap();
        assert_eq!(hit.mean, 1.0);
        assert_eq!(hit.stddev, 0.0);
    }

    #[test]
    fn test_aggregate_identical_values() {
        let results: Vec<EvaluationResult> = (0..5)
            .map(|i| standard_result(&format!("Q{i}"), 0.5, 1.0, 0.6, 0.6))
            .collect();
        let report = evaluator().aggregate(results).unwrap();

        let mrr = report.summary(metric::MRR).unwrap();
        assert_eq!(mrr.mean, 0.5);
        assert_eq!(mrr.stddev, 0.0);
        assert_eq!(mrr.count, 5);
    }

    #[test]
    fn test_aggregate_empty_is_error() {
        assert!(matches!(
            evaluator().aggregate(Vec::new()),
            Err(Error::Aggregation(_))
        ));
    }

    #[test]
    fn test_aggregate_skips_absent_metrics() {
        let mut degraded = standard_result("Q1", 1.0, 1.0, 0.8, 0.7);
        degraded.retrieval = None;
        let healthy = standard_result("Q2", 0.5, 1.0, 0.6, 0.5);

        let report = evaluator().aggregate(vec![degraded, healthy]).unwrap();

        // Retrieval stats cover only the query where they were computed
        let mrr = report.summary(metric::MRR).unwrap();
        assert_eq!(mrr.count, 1);
        assert_eq!(mrr.mean, 0.5);
        assert_eq!(mrr.stddev, 0.0);

        // Generation stats still cover both queries
        assert_eq!(report.summary(metric::FAITHFULNESS).unwrap().count, 2);
    }

    #[test]
    fn test_aggregate_omits_advanced_when_never_computed() {
        let results = vec![standard_result("Q1", 1.0, 1.0, 0.8, 0.7)];
        let report = evaluator().aggregate(results).unwrap();
        assert!(report.summary(metric::BERTSCORE_F1).is_none());
        assert!(report.summary(metric::BLEU).is_none());
        assert!(!report.has_advanced());
    }

    #[test]
    fn test_zero_values_still_count_as_present() {
        // A computed zero is a real observation, not a missing value
        let results = vec![
            standard_result("Q1", 0.0, 0.0, 0.0, 0.0),
            standard_result("Q2", 1.0, 1.0, 1.0, 1.0),
        ];
        let report = evaluator().aggregate(results).unwrap();
        let mrr = report.summary(metric::MRR).unwrap();
        assert_eq!(mrr.count, 2);
        assert_eq!(mrr.mean, 0.5);
    }

    #[test]
    fn test_format_table_is_deterministic() {
        let results = vec![
            standard_result("Q1", 1.0, 1.0, 0.85, 0.72),
            standard_result("Q2", 0.5, 1.0, 0.78, 0.81),
        ];
        let evaluator = evaluator();
        let report = evaluator.aggregate(results).unwrap();

        let first = evaluator.format_table(&report);
        let second = evaluator.format_table(&report);
        assert_eq!(first, second);

        assert!(first.contains("Query ID"));
        assert!(first.contains("Hit@10"));
        assert!(first.contains("Q1"));
        assert!(first.contains("AVERAGE"));
        assert!(first.contains("0.7500"));
    }

    #[test]
    fn test_format_table_renders_unavailable_as_na() {
        let mut result = standard_result("Q1", 1.0, 1.0, 0.8, 0.7);
        result.retrieval = None;
        let evaluator = evaluator();
        let report = evaluator.aggregate(vec![result]).unwrap();

        let table = evaluator.format_table(&report);
        assert!(table.contains("N/A"));
    }

    #[test]
    fn test_advanced_table_absent_without_advanced_scores() {
        let evaluator = evaluator();
        let report = evaluator
            .aggregate(vec![standard_result("Q1", 1.0, 1.0, 0.8, 0.7)])
            .unwrap();
        assert!(evaluator.format_advanced_table(&report).is_none());
    }

    #[test]
    fn test_advanced_table_present_with_advanced_scores() {
        let mut result = standard_result("Q1", 1.0, 1.0, 0.8, 0.7);
        result.advanced = Some(AdvancedScores {
            bertscore_precision: 0.9,
            bertscore_recall: 0.85,
            bertscore_f1: 0.87,
            rouge_l_precision: 0.6,
            rouge_l_recall: 0.5,
            rouge_l_f1: 0.55,
            bleu: 0.4,
        });
        let evaluator = evaluator();
        let report = evaluator.aggregate(vec![result]).unwrap();

        let table = evaluator.format_advanced_table(&report).unwrap();
        assert!(table.contains("BERTScore F1"));
        assert!(table.contains("0.8700"));
        assert!(table.contains("ADVANCED METRIC STATISTICS"));
    }

    #[test]
    fn test_interpretation_bands() {
        let results = vec![
            standard_result("Q1", 1.0, 1.0, 0.85, 0.72),
            standard_result("Q2", 0.5, 1.0, 0.78, 0.81),
        ];
        let report = evaluator().aggregate(results).unwrap();

        let lines = interpretation(&report);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("FAITHFULNESS: Excellent"));
        assert!(lines[1].starts_with("RELEVANCY: Excellent"));
        assert!(lines[2].starts_with("MRR: Excellent"));
    }

    #[test]
    fn test_interpretation_needs_improvement() {
        let results = vec![standard_result("Q1", 0.2, 0.0, 0.3, 0.2)];
        let report = evaluator().aggregate(results).unwrap();

        let lines = interpretation(&report);
        assert!(lines.iter().all(|l| l.contains("Needs improvement")));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EvalConfig {
            retrieval_k: 0,
            ..Default::default()
        };
        assert!(matches!(Evaluator::new(config), Err(Error::Config(_))));
    }
}
