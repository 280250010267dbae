//! Immutable query dataset
//!
//! The dataset is an explicit, ordered, immutable collection of query
//! records, constructed once before evaluation begins and passed by
//! reference into the evaluator. "Adding a query" constructs a new dataset
//! value; nothing is shared mutably across concurrent evaluations.

use crate::error::{Error, Result, ResultExt};
use crate::types::QueryRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Ordered, immutable collection of query records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryDataset {
    queries: im::Vector<QueryRecord>,
}

impl QueryDataset {
    /// Create a dataset from an ordered sequence of records.
    ///
    /// Duplicate query ids are rejected: lookups by id must be unambiguous.
    pub fn from_records(records: impl IntoIterator<Item = QueryRecord>) -> Result<Self> {
        let queries: im::Vector<QueryRecord> = records.into_iter().collect();

        let mut seen = std::collections::HashSet::new();
        for record in &queries {
            if !seen.insert(record.id.as_str()) {
                return Err(Error::dataset(format!(
                    "duplicate query id: {}",
                    record.id
                )));
            }
        }

        Ok(Self { queries })
    }

    /// Load a dataset from a JSON array of query records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<QueryRecord> =
            serde_json::from_str(json).map_err(|e| Error::dataset(e.to_string()))?;
        Self::from_records(records)
    }

    /// Load a dataset from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .context(format!("reading dataset file {}", path.as_ref().display()))?;
        let dataset = Self::from_json_str(&contents)?;
        info!(
            "Loaded {} queries from {}",
            dataset.len(),
            path.as_ref().display()
        );
        Ok(dataset)
    }

    /// A new dataset with `record` appended; `self` is unchanged.
    pub fn with_query(&self, record: QueryRecord) -> Result<Self> {
        if self.get(&record.id).is_some() {
            return Err(Error::dataset(format!(
                "duplicate query id: {}",
                record.id
            )));
        }
        let mut queries = self.queries.clone();
        queries.push_back(record);
        Ok(Self { queries })
    }

    /// Look up a query by id.
    pub fn get(&self, id: &str) -> Option<&QueryRecord> {
        self.queries.iter().find(|q| q.id == id)
    }

    /// The reference answer for a query, if one exists.
    pub fn reference_answer(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(|q| q.reference_answer.as_deref())
    }

    /// All queries in a category, in dataset order.
    pub fn queries_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a QueryRecord> {
        self.queries.iter().filter(move |q| q.category == category)
    }

    /// Iterate queries in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryRecord> {
        self.queries.iter()
    }

    /// Number of queries in the dataset.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether the dataset holds no queries.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
