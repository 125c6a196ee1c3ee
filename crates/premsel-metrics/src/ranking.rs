//! Per-problem ranking metrics.

use premsel_kernel::{ProofOutcome, dedupe_first_seen};
use std::collections::BTreeSet;

fn positive_set<P: AsRef<str>>(positive: &[P]) -> BTreeSet<&str> {
    positive.iter().map(AsRef::as_ref).collect()
}

fn ranked_head<R: AsRef<str>>(ranked: &[R], k: usize) -> Vec<String> {
    dedupe_first_seen(ranked.iter().map(|name| name.as_ref().to_string()))
        .head(k)
        .map(str::to_string)
        .collect()
}

/// Fraction of `positive` found in the top `k` of `ranked`; 0.0 when there
/// are no positives.
pub fn recall_at_k<R, P>(ranked: &[R], positive: &[P], k: usize) -> f64
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    let positive = positive_set(positive);
    if positive.is_empty() {
        return 0.0;
    }
    let hits = ranked_head(ranked, k)
        .iter()
        .filter(|name| positive.contains(name.as_str()))
        .count();
    hits as f64 / positive.len() as f64
}

/// 1.0 iff every positive is in the top `k` of `ranked`, else 0.0.
///
/// More positives than `k` can never succeed; no positives never succeeds.
pub fn success_at_k<R, P>(ranked: &[R], positive: &[P], k: usize) -> f64
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    let positive = positive_set(positive);
    if positive.is_empty() || positive.len() > k {
        return 0.0;
    }
    let head = ranked_head(ranked, k);
    let head: BTreeSet<&str> = head.iter().map(String::as_str).collect();
    if positive.is_subset(&head) { 1.0 } else { 0.0 }
}

/// `1 / rank` of the first positive in `ranked` (1-based); 0.0 if none.
pub fn mean_reciprocal_rank<R, P>(ranked: &[R], positive: &[P]) -> f64
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    let positive = positive_set(positive);
    dedupe_first_seen(ranked.iter().map(|name| name.as_ref().to_string()))
        .iter()
        .position(|name| positive.contains(name))
        .map_or(0.0, |index| 1.0 / (index + 1) as f64)
}

/// Fraction of outcomes that proved; 0.0 for an empty batch.
pub fn prove_rate<T: ProofOutcome>(outcomes: &[T]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let proved = outcomes.iter().filter(|o| o.proved()).count();
    proved as f64 / outcomes.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use premsel_kernel::{ProverVerdict, SzsStatus};

    const RANKED: [&str; 3] = ["a", "b", "c"];

    #[test]
    fn recall_counts_positives_in_head() {
        assert_eq!(recall_at_k(&RANKED, &["b", "d"], 2), 0.5);
        assert_eq!(recall_at_k(&RANKED, &["a", "b", "c"], 10), 1.0);
        assert_eq!(recall_at_k(&RANKED, &[] as &[&str], 2), 0.0);
    }

    #[test]
    fn success_needs_all_positives() {
        assert_eq!(success_at_k(&RANKED, &["a", "b"], 2), 1.0);
        assert_eq!(success_at_k(&RANKED, &["a", "b"], 1), 0.0);
        assert_eq!(success_at_k(&RANKED, &["a", "z"], 3), 0.0);
        assert_eq!(success_at_k(&RANKED, &[] as &[&str], 3), 0.0);
    }

    #[test]
    fn reciprocal_rank_of_first_hit() {
        assert_eq!(mean_reciprocal_rank(&RANKED, &["c"]), 1.0 / 3.0);
        assert_eq!(mean_reciprocal_rank(&RANKED, &["b", "c"]), 0.5);
        assert_eq!(mean_reciprocal_rank(&RANKED, &["z"]), 0.0);
        assert_eq!(mean_reciprocal_rank(&RANKED, &[] as &[&str]), 0.0);
    }

    #[test]
    fn repeated_ranked_names_count_once() {
        let ranked = ["a", "a", "b", "c"];
        assert_eq!(recall_at_k(&ranked, &["b"], 2), 1.0);
        assert_eq!(success_at_k(&ranked, &["a", "b"], 2), 1.0);
        assert_eq!(mean_reciprocal_rank(&ranked, &["c"]), 1.0 / 3.0);
    }

    #[test]
    fn repeated_positives_count_once() {
        assert_eq!(recall_at_k(&RANKED, &["b", "b", "d"], 2), 0.5);
    }

    #[test]
    fn prove_rate_over_verdicts() {
        let verdicts = vec![
            ProverVerdict::new(SzsStatus::Theorem, Default::default(), ""),
            ProverVerdict::timed_out(""),
            ProverVerdict::failed("spawn failed", ""),
            ProverVerdict::new(SzsStatus::Unsatisfiable, Default::default(), ""),
        ];
        assert_eq!(prove_rate(&verdicts), 0.5);
        assert_eq!(prove_rate::<ProverVerdict>(&[]), 0.0);
        assert_eq!(prove_rate(&[SzsStatus::GaveUp]), 0.0);
    }
}
