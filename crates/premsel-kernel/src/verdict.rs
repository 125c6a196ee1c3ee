//! SZS statuses and prover verdicts.
//!
//! A verdict is derived entirely from prover stdout; the process exit code
//! is never consulted. Only `Theorem` and `Unsatisfiable` count as proved.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A standardized SZS verdict keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SzsStatus {
    Theorem,
    Unsatisfiable,
    Satisfiable,
    CounterSatisfiable,
    Timeout,
    GaveUp,
    ResourceOut,
    Unknown,
    /// The prover process could not be run or its output was unusable.
    Error,
    Other(String),
}

impl SzsStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Theorem => "Theorem",
            Self::Unsatisfiable => "Unsatisfiable",
            Self::Satisfiable => "Satisfiable",
            Self::CounterSatisfiable => "CounterSatisfiable",
            Self::Timeout => "Timeout",
            Self::GaveUp => "GaveUp",
            Self::ResourceOut => "ResourceOut",
            Self::Unknown => "Unknown",
            Self::Error => "Error",
            Self::Other(status) => status,
        }
    }

    /// True iff this status means a proof was found.
    pub fn proves(&self) -> bool {
        matches!(self, Self::Theorem | Self::Unsatisfiable)
    }
}

impl From<&str> for SzsStatus {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Theorem" => Self::Theorem,
            "Unsatisfiable" => Self::Unsatisfiable,
            "Satisfiable" => Self::Satisfiable,
            "CounterSatisfiable" => Self::CounterSatisfiable,
            "Timeout" => Self::Timeout,
            "GaveUp" => Self::GaveUp,
            "ResourceOut" => Self::ResourceOut,
            "Unknown" | "" => Self::Unknown,
            "Error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SzsStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<SzsStatus> for String {
    fn from(value: SzsStatus) -> Self {
        match value {
            SzsStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for SzsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that carries a proved / not-proved outcome.
pub trait ProofOutcome {
    fn proved(&self) -> bool;
}

impl ProofOutcome for SzsStatus {
    fn proved(&self) -> bool {
        self.proves()
    }
}

/// The outcome of one prover invocation.
///
/// `proved` is always `status.proves()`; fields are read-only after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverVerdict {
    status: SzsStatus,
    proved: bool,
    positive_axioms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing)]
    raw_output: String,
}

impl ProverVerdict {
    pub fn new(
        status: SzsStatus,
        positive_axioms: BTreeSet<String>,
        raw_output: impl Into<String>,
    ) -> Self {
        Self {
            proved: status.proves(),
            status,
            positive_axioms: positive_axioms.into_iter().collect(),
            error: None,
            raw_output: raw_output.into(),
        }
    }

    /// The process exceeded its wall-clock budget.
    pub fn timed_out(partial_output: impl Into<String>) -> Self {
        Self::new(SzsStatus::Timeout, BTreeSet::new(), partial_output)
    }

    /// The process could not be run or its output was unusable.
    pub fn failed(message: impl Into<String>, partial_output: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(SzsStatus::Error, BTreeSet::new(), partial_output)
        }
    }

    pub fn status(&self) -> &SzsStatus {
        &self.status
    }

    pub fn is_proved(&self) -> bool {
        self.proved
    }

    /// Sorted, deduplicated axiom names cited by the refutation.
    pub fn positive_axioms(&self) -> &[String] {
        &self.positive_axioms
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn raw_output(&self) -> &str {
        &self.raw_output
    }
}

impl ProofOutcome for ProverVerdict {
    fn proved(&self) -> bool {
        self.proved
    }
}
