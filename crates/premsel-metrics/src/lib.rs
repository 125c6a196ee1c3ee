//! # premsel-metrics
//!
//! Scoring a ranked premise list against the premises a proof actually used.
//!
//! Every ranking metric deduplicates the ranked list by first occurrence
//! before looking at it, so a name repeated in a ranking never counts twice.

pub mod ranking;
pub mod summary;

pub use ranking::{mean_reciprocal_rank, prove_rate, recall_at_k, success_at_k};
pub use summary::{MetricsSummary, ScoreCard};
