//! Ranked premise selection.
//!
//! The pipeline is stateless: fit → project → score → rank. Every call works
//! only on its arguments, so identical input always yields identical output.

use crate::tfidf::{TfIdfModel, cosine};
use premsel_kernel::OrderedNames;
use serde::{Deserialize, Serialize};

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPremise {
    pub name: String,
    pub score: f64,
}

/// Candidates by descending score; ties keep corpus order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedSelection {
    entries: Vec<ScoredPremise>,
}

impl RankedSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ScoredPremise] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredPremise> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn into_names(self) -> Vec<String> {
        self.entries.into_iter().map(|e| e.name).collect()
    }
}

/// Cosine similarity of the conjecture to each axiom, in input order.
///
/// The vector space is fitted on the axiom texts alone.
pub fn score_premises<N, T>(conjecture: &str, axioms: &[(N, T)]) -> Vec<f64>
where
    N: AsRef<str>,
    T: AsRef<str>,
{
    let texts: Vec<&str> = axioms.iter().map(|(_, text)| text.as_ref()).collect();
    let model = TfIdfModel::fit(&texts);
    let query = model.transform(conjecture);
    texts
        .iter()
        .map(|text| cosine(&query, &model.transform(text)))
        .collect()
}

/// Order `names` by descending `scores` (stable), drop repeated names, and
/// keep at most `k`.
pub fn rank<N: AsRef<str>>(names: &[N], scores: &[f64], k: usize) -> RankedSelection {
    let mut order: Vec<usize> = (0..names.len().min(scores.len())).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut seen = OrderedNames::new();
    let mut entries = Vec::with_capacity(k.min(order.len()));
    for index in order {
        if entries.len() == k {
            break;
        }
        let name = names[index].as_ref();
        if seen.insert(name) {
            entries.push(ScoredPremise {
                name: name.to_string(),
                score: scores[index],
            });
        }
    }

    RankedSelection { entries }
}

/// Rank `axioms` (`(name, text)` in corpus order) against `conjecture` and
/// return the top `k`. `k` beyond the candidate count is clamped.
///
/// A blank conjecture or an empty candidate set gives an empty selection. A
/// conjecture sharing no term with the axioms scores every axiom 0.0, so the
/// ranking falls back to corpus order.
pub fn select_premises<N, T>(conjecture: &str, axioms: &[(N, T)], k: usize) -> RankedSelection
where
    N: AsRef<str>,
    T: AsRef<str>,
{
    if conjecture.trim().is_empty() || axioms.is_empty() || k == 0 {
        return RankedSelection::empty();
    }
    let scores = score_premises(conjecture, axioms);
    let names: Vec<&str> = axioms.iter().map(|(name, _)| name.as_ref()).collect();
    rank(&names, &scores, k)
}
