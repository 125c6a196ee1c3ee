//! `include('path')` directive scanning.
//!
//! Includes are found by scanning the comment-stripped text on its own,
//! independent of statement splitting, so they are picked up wherever they
//! sit in the file.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// One include directive, optionally restricted to a list of formula names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub target: String,
    pub selection: Option<Vec<String>>,
}

impl IncludeDirective {
    /// Whether a formula named `name` passes this include's selection.
    pub fn admits(&self, name: &str) -> bool {
        match &self.selection {
            Some(names) => names.iter().any(|selected| selected == name),
            None => true,
        }
    }
}

fn include_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\binclude\s*\(\s*['"]\s*([^'"]*?)\s*['"]\s*(?:,\s*\[([^\]]*)\]\s*)?\)"#)
            .expect("include regex must compile")
    })
}

/// Every include directive in `stripped`, in textual order.
pub fn scan_includes(stripped: &str) -> Vec<IncludeDirective> {
    include_re()
        .captures_iter(stripped)
        .map(|caps| IncludeDirective {
            target: caps[1].to_string(),
            selection: caps.get(2).map(|list| {
                list.as_str()
                    .split(',')
                    .map(|name| name.trim().trim_matches('\'').to_string())
                    .filter(|name| !name.is_empty())
                    .collect()
            }),
        })
        .collect()
}

/// Candidate locations for an include target: the corpus root first, then
/// the directory of the including file.
pub fn candidate_paths(target: &str, root_dir: &Path, including_file: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![root_dir.join(target)];
    if let Some(parent) = including_file.parent() {
        let sibling = parent.join(target);
        if sibling != candidates[0] {
            candidates.push(sibling);
        }
    }
    candidates
}
