//! Named, typed formulas as they appear in a TPTP corpus.
//!
//! A formula is one annotated statement `keyword(name, role, body).` taken
//! verbatim from a problem or axiom file. The kernel never interprets the
//! body: premise selection works on its text, and the prover is the only
//! component that understands its logic.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Formula syntax dialect, i.e. the statement keyword.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// First-order form.
    Fof,
    /// Clause normal form.
    Cnf,
    /// Typed first-order form.
    Tff,
    /// Typed higher-order form.
    Thf,
}

impl Dialect {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Fof => "fof",
            Self::Cnf => "cnf",
            Self::Tff => "tff",
            Self::Thf => "thf",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fof" => Ok(Self::Fof),
            "cnf" => Ok(Self::Cnf),
            "tff" => Ok(Self::Tff),
            "thf" => Ok(Self::Thf),
            _ => Err(format!("unknown formula dialect: {s}")),
        }
    }
}

/// The role a formula plays in its problem.
///
/// Unrecognised roles are kept verbatim in [`Role::Other`] so a corpus with
/// prover-specific roles still parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Axiom,
    Hypothesis,
    Definition,
    Assumption,
    Lemma,
    Theorem,
    Corollary,
    Conjecture,
    NegatedConjecture,
    Plain,
    Type,
    Unknown,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Axiom => "axiom",
            Self::Hypothesis => "hypothesis",
            Self::Definition => "definition",
            Self::Assumption => "assumption",
            Self::Lemma => "lemma",
            Self::Theorem => "theorem",
            Self::Corollary => "corollary",
            Self::Conjecture => "conjecture",
            Self::NegatedConjecture => "negated_conjecture",
            Self::Plain => "plain",
            Self::Type => "type",
            Self::Unknown => "unknown",
            Self::Other(role) => role,
        }
    }

    /// Roles that make a formula a candidate premise for selection.
    pub fn is_premise(&self) -> bool {
        matches!(
            self,
            Self::Axiom
                | Self::Hypothesis
                | Self::Definition
                | Self::Assumption
                | Self::Lemma
                | Self::Theorem
                | Self::Corollary
        )
    }

    /// Roles that state the goal of the problem.
    pub fn is_goal(&self) -> bool {
        matches!(self, Self::Conjecture | Self::NegatedConjecture)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim() {
            "axiom" => Self::Axiom,
            "hypothesis" => Self::Hypothesis,
            "definition" => Self::Definition,
            "assumption" => Self::Assumption,
            "lemma" => Self::Lemma,
            "theorem" => Self::Theorem,
            "corollary" => Self::Corollary,
            "conjecture" => Self::Conjecture,
            "negated_conjecture" => Self::NegatedConjecture,
            "plain" => Self::Plain,
            "type" => Self::Type,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed statement. Immutable once built by the corpus parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    pub name: String,
    pub role: Role,
    pub dialect: Dialect,
    /// The formula body: the third top-level field of the statement.
    pub text: String,
    /// Remaining top-level fields (source / useful-info), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<String>,
    pub source_file: PathBuf,
    /// 1-based line on which the statement starts.
    pub line: usize,
}

impl Formula {
    /// Render the formula back as a single TPTP statement. Annotations are
    /// left out, so the statement no longer points at its source file.
    pub fn to_tptp(&self) -> String {
        format!("{}({}, {}, {}).", self.dialect, self.name, self.role, self.text)
    }
}
