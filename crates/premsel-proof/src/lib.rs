//! # premsel-proof
//!
//! Running an external prover and reading its verdict.
//!
//! ```text
//! problem file ──▶ ProverClient (cpu limit + grace, kill on timeout)
//!                      │ stdout
//!                      ▼
//!              extract_verdict ──▶ ProverVerdict { status, proved, positive_axioms }
//! ```
//!
//! Verdicts depend on stdout only. `prove_batch` fans a problem list out over
//! a bounded worker pool.

pub mod batch;
pub mod error;
pub mod extract;
pub mod prover;

pub use batch::{BatchEvent, discover_problems, prove_batch};
pub use error::ProverError;
pub use extract::{cited_premises, extract_verdict, refutation_block, szs_status};
pub use prover::{ProverClient, ProverConfig, ProverRun};
