//! # Premsel Kernel
//!
//! Shared vocabulary for premise selection over a TPTP corpus.
//!
//! ## Architecture
//!
//! ```text
//! Formula          ← name, role, dialect, body text, source file
//!     │
//! OrderedNames     ← first-seen dedupe for rankings and metric inputs
//!     │
//! SzsStatus        ← prover verdict keyword (only Theorem/Unsatisfiable prove)
//!     │
//! ProverVerdict    ← status + positive axioms cited by a refutation
//! ```
//!
//! The kernel performs no I/O. Parsing lives in `premsel-corpus`, ranking in
//! `premsel-select`, proof extraction in `premsel-proof`, scoring in
//! `premsel-metrics`.

pub mod formula;
pub mod ordered;
pub mod verdict;

pub use formula::{Dialect, Formula, Role};
pub use ordered::{OrderedNames, dedupe_first_seen};
pub use verdict::{ProofOutcome, ProverVerdict, SzsStatus};
