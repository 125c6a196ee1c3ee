//! Errors from configuring or driving the external prover.

/// Failures that prevent a prover run from being attempted at all.
///
/// Failures of an attempted run are not errors: they come back as a
/// verdict with status `Timeout` or `Error`.
#[derive(Debug, thiserror::Error)]
pub enum ProverError {
    #[error("invalid prover config: {0}")]
    InvalidConfig(String),

    #[error("failed to list problems under {path}: {message}")]
    Discover { path: String, message: String },
}
