//! Recursive corpus loading.
//!
//! One file is parsed as: strip comments, resolve its includes depth-first,
//! then split and classify its own statements. Include resolution is guarded
//! by the set of files still being parsed (cycles) and a memo of files
//! already parsed (diamonds).
//!
//! Name collisions are first-wins: the formula loaded first keeps the name
//! and every later duplicate is recorded as a [`Diagnostic::NameCollision`].

use crate::corpus::Corpus;
use crate::error::{CorpusError, Diagnostic};
use crate::include::{IncludeDirective, candidate_paths, scan_includes};
use crate::scan::{Classified, split_statements, strip_comments};
use indexmap::IndexMap;
use premsel_kernel::Formula;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const EXCERPT_CHARS: usize = 80;

type FormulaMap = IndexMap<String, Formula>;

/// Parse `root_file` and everything it transitively includes.
///
/// `root_dir` is the corpus root that include paths are relative to. A
/// relative `root_file` that does not exist as given is also looked up under
/// `root_dir`. Only an unreadable root file is an error; missing includes
/// and malformed statements become diagnostics on the returned corpus.
pub fn parse(root_file: impl AsRef<Path>, root_dir: impl AsRef<Path>) -> Result<Corpus, CorpusError> {
    let root_file = root_file.as_ref();
    let root_dir = root_dir.as_ref();

    let located = if root_file.is_relative() && !root_file.exists() {
        root_dir.join(root_file)
    } else {
        root_file.to_path_buf()
    };
    let bytes = fs::read(&located).map_err(|source| CorpusError::Read {
        path: located.clone(),
        source,
    })?;
    let canonical = fs::canonicalize(&located).unwrap_or(located);

    let mut loader = Loader::new(root_dir);
    let formulas = loader.load_file(&canonical, &String::from_utf8_lossy(&bytes));
    tracing::debug!(
        root = %canonical.display(),
        formulas = formulas.len(),
        files = loader.files.len(),
        diagnostics = loader.diagnostics.len(),
        "corpus parsed"
    );

    Ok(Corpus::new(
        canonical,
        formulas,
        loader.files,
        loader.diagnostics,
    ))
}

/// Parse TPTP text that does not live on disk (includes still resolve
/// against `root_dir`). `origin` labels the formulas' source file.
pub fn parse_str(text: &str, origin: impl AsRef<Path>, root_dir: impl AsRef<Path>) -> Corpus {
    let origin = origin.as_ref().to_path_buf();
    let mut loader = Loader::new(root_dir.as_ref());
    let formulas = loader.load_file(&origin, text);
    Corpus::new(origin, formulas, loader.files, loader.diagnostics)
}

struct Loader<'a> {
    root_dir: &'a Path,
    in_progress: HashSet<PathBuf>,
    done: HashMap<PathBuf, FormulaMap>,
    files: Vec<PathBuf>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Loader<'a> {
    fn new(root_dir: &'a Path) -> Self {
        Self {
            root_dir,
            in_progress: HashSet::new(),
            done: HashMap::new(),
            files: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn load_file(&mut self, path: &Path, text: &str) -> FormulaMap {
        self.in_progress.insert(path.to_path_buf());
        self.files.push(path.to_path_buf());

        let stripped = strip_comments(text);
        let mut merged = FormulaMap::new();

        for directive in scan_includes(&stripped) {
            let included = self.load_include(path, &directive);
            for (name, formula) in included {
                if directive.admits(&name) {
                    self.merge(&mut merged, formula);
                }
            }
        }

        let (statements, broken) = split_statements(&stripped);
        for raw in broken {
            self.malformed(path, raw.line, "unbalanced or unterminated statement", &raw.text);
        }
        for raw in statements {
            match crate::scan::classify(&raw.text) {
                Classified::Formula(stmt) => {
                    let formula = Formula {
                        name: stmt.name,
                        role: stmt.role,
                        dialect: stmt.dialect,
                        text: stmt.body,
                        annotations: stmt.annotations,
                        source_file: path.to_path_buf(),
                        line: raw.line,
                    };
                    self.merge(&mut merged, formula);
                }
                Classified::Include => {}
                Classified::Malformed(reason) => {
                    self.malformed(path, raw.line, &reason, &raw.text);
                }
            }
        }

        self.in_progress.remove(path);
        self.done.insert(path.to_path_buf(), merged.clone());
        merged
    }

    fn load_include(&mut self, from: &Path, directive: &IncludeDirective) -> FormulaMap {
        let candidates = candidate_paths(&directive.target, self.root_dir, from);
        let Some(found) = candidates.iter().find(|candidate| candidate.is_file()) else {
            let tried: Vec<String> = candidates
                .iter()
                .map(|candidate| candidate.display().to_string())
                .collect();
            let reason = format!("not found (tried {})", tried.join(", "));
            self.missing_include(from, &directive.target, reason);
            return FormulaMap::new();
        };

        let canonical = fs::canonicalize(found).unwrap_or_else(|_| found.clone());
        if self.in_progress.contains(&canonical) {
            tracing::debug!(
                file = %from.display(),
                include = %canonical.display(),
                "include cycle skipped"
            );
            self.diagnostics.push(Diagnostic::IncludeCycle {
                file: from.to_path_buf(),
                target: canonical,
            });
            return FormulaMap::new();
        }
        if let Some(parsed) = self.done.get(&canonical) {
            return parsed.clone();
        }

        match fs::read(&canonical) {
            Ok(bytes) => self.load_file(&canonical, &String::from_utf8_lossy(&bytes)),
            Err(e) => {
                self.missing_include(from, &directive.target, e.to_string());
                FormulaMap::new()
            }
        }
    }

    fn merge(&mut self, into: &mut FormulaMap, formula: Formula) {
        match into.get(&formula.name) {
            Some(existing) if existing == &formula => {}
            Some(existing) => {
                tracing::warn!(
                    name = %formula.name,
                    kept = %existing.source_file.display(),
                    shadowed = %formula.source_file.display(),
                    "duplicate formula name, keeping first"
                );
                self.diagnostics.push(Diagnostic::NameCollision {
                    name: formula.name.clone(),
                    kept: existing.source_file.clone(),
                    shadowed: formula.source_file,
                });
            }
            None => {
                into.insert(formula.name.clone(), formula);
            }
        }
    }

    fn malformed(&mut self, file: &Path, line: usize, reason: &str, text: &str) {
        let excerpt: String = text.chars().take(EXCERPT_CHARS).collect();
        tracing::warn!(
            file = %file.display(),
            line,
            reason,
            "skipping malformed statement"
        );
        self.diagnostics.push(Diagnostic::MalformedStatement {
            file: file.to_path_buf(),
            line,
            reason: reason.to_string(),
            excerpt,
        });
    }

    fn missing_include(&mut self, file: &Path, target: &str, reason: String) {
        tracing::warn!(
            file = %file.display(),
            include = target,
            reason = %reason,
            "could not load include"
        );
        self.diagnostics.push(Diagnostic::MissingInclude {
            file: file.to_path_buf(),
            target: target.to_string(),
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use premsel_kernel::Role;

    #[test]
    fn parse_str_collects_formulas_in_order() {
        let corpus = parse_str(
            "% comment\nfof(a1, axiom, p(X)).\nfof(a2, axiom, q).\nfof(goal, conjecture, p(c)).",
            "inline.p",
            ".",
        );
        let names: Vec<&str> = corpus.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2", "goal"]);
        assert_eq!(corpus.get("a1").unwrap().line, 2);
        assert_eq!(corpus.get("goal").unwrap().role, Role::Conjecture);
        assert!(corpus.diagnostics().is_empty());
    }

    #[test]
    fn duplicate_names_in_one_file_keep_first() {
        let corpus = parse_str("fof(a, axiom, p).\nfof(a, axiom, q).", "dup.p", ".");
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get("a").unwrap().text, "p");
        assert!(matches!(
            corpus.diagnostics(),
            [Diagnostic::NameCollision { name, .. }] if name == "a"
        ));
    }

    #[test]
    fn malformed_statement_is_skipped_and_reported() {
        let corpus = parse_str(
            "fof(ok1, axiom, p).\nfof(broken, axiom).\nfof(ok2, axiom, q).",
            "bad.p",
            ".",
        );
        assert_eq!(corpus.len(), 2);
        assert!(matches!(
            corpus.diagnostics(),
            [Diagnostic::MalformedStatement { line: 2, .. }]
        ));
    }

    #[test]
    fn unclosed_statement_does_not_swallow_the_rest_of_the_file() {
        let corpus = parse_str(
            "fof(bad, axiom, p(X).\nfof(a1, axiom, q).\nfof(a2, axiom, r).\nfof(goal, conjecture, q).\n",
            "unclosed.p",
            ".",
        );
        let names: Vec<&str> = corpus.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2", "goal"]);
        assert!(matches!(
            corpus.diagnostics(),
            [Diagnostic::MalformedStatement { line: 1, .. }]
        ));
    }

    #[test]
    fn stray_quote_only_costs_its_own_statement() {
        let corpus = parse_str(
            "fof(bad, axiom, p(it's)).\n% the rest is fine\nfof(a1, axiom, q).\nfof(goal, conjecture, q).\n",
            "quote.p",
            ".",
        );
        let names: Vec<&str> = corpus.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "goal"]);
        assert_eq!(corpus.get("a1").unwrap().line, 3);
        assert!(matches!(
            corpus.diagnostics(),
            [Diagnostic::MalformedStatement { line: 1, .. }]
        ));
    }

    #[test]
    fn missing_include_is_a_diagnostic() {
        let corpus = parse_str(
            "include('Axioms/DOES-NOT-EXIST.ax').\nfof(a, axiom, p).",
            "/nonexistent-premsel-dir/p.p",
            "/nonexistent-premsel-dir",
        );
        assert_eq!(corpus.len(), 1);
        assert!(matches!(
            corpus.diagnostics(),
            [Diagnostic::MissingInclude { target, .. }] if target == "Axioms/DOES-NOT-EXIST.ax"
        ));
    }
}
