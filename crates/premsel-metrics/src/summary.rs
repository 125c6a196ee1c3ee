//! Aggregated scores across problems.

use crate::ranking::{mean_reciprocal_rank, recall_at_k, success_at_k};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ranking scores for one problem at each requested cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub problem: String,
    pub positives: usize,
    pub recall: BTreeMap<usize, f64>,
    pub success: BTreeMap<usize, f64>,
    pub mrr: f64,
}

impl ScoreCard {
    pub fn score<R, P>(problem: impl Into<String>, ranked: &[R], positive: &[P], ks: &[usize]) -> Self
    where
        R: AsRef<str>,
        P: AsRef<str>,
    {
        let positives = positive
            .iter()
            .map(AsRef::as_ref)
            .collect::<std::collections::BTreeSet<&str>>()
            .len();
        Self {
            problem: problem.into(),
            positives,
            recall: ks.iter().map(|&k| (k, recall_at_k(ranked, positive, k))).collect(),
            success: ks.iter().map(|&k| (k, success_at_k(ranked, positive, k))).collect(),
            mrr: mean_reciprocal_rank(ranked, positive),
        }
    }
}

/// Means of [`ScoreCard`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub problems: usize,
    pub mean_recall: BTreeMap<usize, f64>,
    pub mean_success: BTreeMap<usize, f64>,
    pub mean_mrr: f64,
}

impl MetricsSummary {
    /// Cutoffs missing from some cards are averaged over the cards that
    /// have them.
    pub fn from_cards(cards: &[ScoreCard]) -> Self {
        if cards.is_empty() {
            return Self::default();
        }
        let mrr_total: f64 = cards.iter().map(|card| card.mrr).sum();
        Self {
            problems: cards.len(),
            mean_recall: mean_by_cutoff(cards.iter().map(|card| &card.recall)),
            mean_success: mean_by_cutoff(cards.iter().map(|card| &card.success)),
            mean_mrr: mrr_total / cards.len() as f64,
        }
    }
}

fn mean_by_cutoff<'a>(
    maps: impl Iterator<Item = &'a BTreeMap<usize, f64>>,
) -> BTreeMap<usize, f64> {
    let mut totals: BTreeMap<usize, (f64, usize)> = BTreeMap::new();
    for map in maps {
        for (&k, &value) in map {
            let slot = totals.entry(k).or_insert((0.0, 0));
            slot.0 += value;
            slot.1 += 1;
        }
    }
    totals
        .into_iter()
        .map(|(k, (sum, count))| (k, sum / count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_scores_each_cutoff() {
        let card = ScoreCard::score("PUZ001+1", &["a", "b", "c"], &["b", "d"], &[1, 2]);
        assert_eq!(card.positives, 2);
        assert_eq!(card.recall[&1], 0.0);
        assert_eq!(card.recall[&2], 0.5);
        assert_eq!(card.success[&2], 0.0);
        assert_eq!(card.mrr, 0.5);
    }

    #[test]
    fn summary_averages_cards() {
        let cards = vec![
            ScoreCard::score("p1", &["a", "b"], &["a"], &[1]),
            ScoreCard::score("p2", &["a", "b"], &["b"], &[1]),
        ];
        let summary = MetricsSummary::from_cards(&cards);
        insta::assert_json_snapshot!(summary, @r#"
        {
          "problems": 2,
          "mean_recall": {
            "1": 0.5
          },
          "mean_success": {
            "1": 0.5
          },
          "mean_mrr": 0.75
        }
        "#);
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = MetricsSummary::from_cards(&[]);
        assert_eq!(summary.problems, 0);
        assert_eq!(summary.mean_mrr, 0.0);
        assert!(summary.mean_recall.is_empty());
    }
}
