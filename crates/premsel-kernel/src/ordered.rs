//! Insertion-ordered name sets.
//!
//! Ranked selections and metric inputs are deduplicated by first occurrence.
//! `OrderedNames` keeps the first-seen order and answers membership in O(1).

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A set of names that remembers the order in which names were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedNames {
    names: IndexSet<String>,
}

impl OrderedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name; returns false if it was already present (order kept).
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// 0-based position of `name` in first-seen order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The first `k` names; `k` larger than the set is clamped.
    pub fn head(&self, k: usize) -> impl Iterator<Item = &str> {
        self.iter().take(k)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for OrderedNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut names = Self::new();
        for name in iter {
            names.insert(name);
        }
        names
    }
}

impl<'a> IntoIterator for &'a OrderedNames {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Deduplicate `items` keeping the first occurrence of each.
pub fn dedupe_first_seen<I, S>(items: I) -> OrderedNames
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_occurrence_order() {
        let names = dedupe_first_seen(["b", "a", "b", "c", "a"]);
        assert_eq!(names.clone().into_vec(), vec!["b", "a", "c"]);
        assert_eq!(names.position("c"), Some(2));
        assert!(names.contains("a"));
        assert!(!names.contains("d"));
    }

    #[test]
    fn head_clamps_to_len() {
        let names = dedupe_first_seen(["x", "y"]);
        assert_eq!(names.head(10).collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(names.head(0).count(), 0);
    }
}
