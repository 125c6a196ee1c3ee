//! Dataset-level statistics over result records.

use crate::record::ResultRecord;
use premsel_kernel::ProofOutcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A solved problem shown as an example in a dataset report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedSample {
    pub filename: String,
    pub axiom_count: usize,
    pub axioms: Vec<String>,
}

/// Counts and samples for a whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total: usize,
    pub solved: usize,
    pub failed: usize,
    pub statuses: BTreeMap<String, usize>,
    /// Solved records that cite no premises; usually an extraction fault.
    pub solved_without_axioms: Vec<String>,
    pub samples: Vec<SolvedSample>,
}

impl DatasetSummary {
    /// Summarise `records`, keeping the first `sample_size` solved ones as
    /// samples.
    pub fn from_records(records: &[ResultRecord], sample_size: usize) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            *summary
                .statuses
                .entry(record.status.as_str().to_string())
                .or_default() += 1;
            if !record.proved() {
                summary.failed += 1;
                continue;
            }
            summary.solved += 1;
            if record.positive_axioms.is_empty() {
                summary.solved_without_axioms.push(record.filename.clone());
            }
            if summary.samples.len() < sample_size {
                summary.samples.push(SolvedSample {
                    filename: record.filename.clone(),
                    axiom_count: record.positive_axioms.len(),
                    axioms: record.positive_axioms.clone(),
                });
            }
        }
        summary
    }

    /// Percentage of records that solved; 0.0 for an empty dataset.
    pub fn solved_percent(&self) -> f64 {
        percent(self.solved, self.total)
    }

    pub fn failed_percent(&self) -> f64 {
        percent(self.failed, self.total)
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}
