//! The resolved corpus: every formula reachable from one root problem file.

use crate::error::{CorpusError, Diagnostic};
use indexmap::IndexMap;
use premsel_kernel::{Formula, Role};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Ordered name → formula mapping built from a root file and its includes.
///
/// Order is load order: included formulas (depth-first, directive order)
/// come before the including file's own statements.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    formulas: IndexMap<String, Formula>,
    files: Vec<PathBuf>,
    diagnostics: Vec<Diagnostic>,
}

/// The goal of a problem: one conjecture, or the negated-conjecture clauses
/// of a CNF problem.
#[derive(Debug, Clone)]
pub struct Goal<'a> {
    formulas: Vec<&'a Formula>,
}

impl<'a> Goal<'a> {
    pub fn formulas(&self) -> &[&'a Formula] {
        &self.formulas
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.formulas.iter().map(|f| f.name.as_str()).collect()
    }

    /// Goal text used as the selection query.
    pub fn text(&self) -> String {
        self.formulas
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Corpus {
    pub(crate) fn new(
        root: PathBuf,
        formulas: IndexMap<String, Formula>,
        files: Vec<PathBuf>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            root,
            formulas,
            files,
            diagnostics,
        }
    }

    /// Canonical path of the root problem file.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Formula> {
        self.formulas.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.values()
    }

    pub fn by_role<'a>(&'a self, role: &'a Role) -> impl Iterator<Item = &'a Formula> + 'a {
        self.iter().filter(move |f| &f.role == role)
    }

    /// Candidate premises in corpus order.
    pub fn premises(&self) -> impl Iterator<Item = &Formula> {
        self.iter().filter(|f| f.role.is_premise())
    }

    /// `(name, text)` pairs for the selector, in corpus order.
    pub fn premise_texts(&self) -> Vec<(&str, &str)> {
        self.premises()
            .map(|f| (f.name.as_str(), f.text.as_str()))
            .collect()
    }

    /// Resolve the problem goal.
    ///
    /// More than one `conjecture` is malformed input. Without a conjecture
    /// the `negated_conjecture` formulas together form the goal.
    pub fn goal(&self) -> Result<Goal<'_>, CorpusError> {
        let conjectures: Vec<&Formula> = self.by_role(&Role::Conjecture).collect();
        match conjectures.len() {
            1 => Ok(Goal {
                formulas: conjectures,
            }),
            0 => {
                let negated: Vec<&Formula> = self.by_role(&Role::NegatedConjecture).collect();
                if negated.is_empty() {
                    Err(CorpusError::NoConjecture {
                        root: self.root.clone(),
                    })
                } else {
                    Ok(Goal { formulas: negated })
                }
            }
            _ => Err(CorpusError::MultipleConjectures {
                root: self.root.clone(),
                names: conjectures.iter().map(|f| f.name.clone()).collect(),
            }),
        }
    }

    /// Formula count per role name.
    pub fn role_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for formula in self.iter() {
            *counts.entry(formula.role.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Every file that contributed, in load order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
