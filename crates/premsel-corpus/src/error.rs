//! Errors and non-fatal diagnostics raised while building a corpus.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hard failures. Everything below the root file degrades to a
/// [`Diagnostic`] instead.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no conjecture or negated_conjecture in {}", .root.display())]
    NoConjecture { root: PathBuf },

    #[error("multiple conjectures in {}: {names:?}", .root.display())]
    MultipleConjectures { root: PathBuf, names: Vec<String> },
}

/// A problem found while parsing that skipped one unit but let the rest of
/// the corpus build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A statement that does not have the shape `keyword(name, role, body)`.
    MalformedStatement {
        file: PathBuf,
        line: usize,
        reason: String,
        excerpt: String,
    },

    /// An include target that could not be read.
    MissingInclude {
        file: PathBuf,
        target: String,
        reason: String,
    },

    /// An include that points back at a file still being parsed.
    IncludeCycle { file: PathBuf, target: PathBuf },

    /// A second formula with an already-loaded name; the first one is kept.
    NameCollision {
        name: String,
        kept: PathBuf,
        shadowed: PathBuf,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedStatement {
                file,
                line,
                reason,
                excerpt,
            } => write!(
                f,
                "{}:{line}: malformed statement ({reason}): {excerpt}",
                file.display()
            ),
            Self::MissingInclude {
                file,
                target,
                reason,
            } => write!(
                f,
                "{}: include '{target}' not loaded: {reason}",
                file.display()
            ),
            Self::IncludeCycle { file, target } => write!(
                f,
                "{}: include cycle back to {}",
                file.display(),
                target.display()
            ),
            Self::NameCollision {
                name,
                kept,
                shadowed,
            } => write!(
                f,
                "duplicate formula `{name}` in {} ignored (kept {})",
                shadowed.display(),
                kept.display()
            ),
        }
    }
}
