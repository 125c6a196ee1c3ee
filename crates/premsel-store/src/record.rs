//! One persisted prover outcome.

use premsel_kernel::{ProofOutcome, ProverVerdict, SzsStatus};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// A JSONL line: which problem ran and what the prover said about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub filename: String,
    #[serde(default)]
    pub filepath: String,
    pub status: SzsStatus,
    /// As stored. Older datasets set this for non-proving statuses too, so
    /// [`ProofOutcome::proved`] reads `status` instead.
    pub proof_found: bool,
    /// Sorted premise names cited by the refutation.
    #[serde(default, alias = "used_axioms")]
    pub positive_axioms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_ms: Option<u64>,
}

impl ResultRecord {
    pub fn from_verdict(problem: &Path, verdict: &ProverVerdict, runtime: Option<Duration>) -> Self {
        let filename = problem
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            filename,
            filepath: problem.display().to_string(),
            status: verdict.status().clone(),
            proof_found: verdict.is_proved(),
            positive_axioms: verdict.positive_axioms().to_vec(),
            error_msg: verdict.error().map(str::to_string),
            runtime_ms: runtime.map(|elapsed| elapsed.as_millis() as u64),
        }
    }

    /// Problem name without the `.p` extension.
    pub fn problem_name(&self) -> &str {
        self.filename
            .strip_suffix(".p")
            .unwrap_or(&self.filename)
    }
}

impl ProofOutcome for ResultRecord {
    fn proved(&self) -> bool {
        self.status.proves()
    }
}
