//! # premsel-select
//!
//! Premise selection by textual similarity.
//!
//! ```text
//! axiom texts ──▶ TfIdfModel::fit ──▶ axiom vectors ─┐
//! conjecture  ──▶ TfIdfModel::transform ─────────────┴─▶ cosine ─▶ rank (stable, dedupe, top-k)
//! ```
//!
//! No filesystem access: callers pass `(name, text)` pairs taken from a
//! parsed corpus.

pub mod selection;
pub mod tfidf;
pub mod tokenize;

pub use selection::{RankedSelection, ScoredPremise, rank, score_premises, select_premises};
pub use tfidf::{SparseVector, TfIdfModel, cosine};
pub use tokenize::tokenize;
