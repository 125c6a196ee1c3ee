//! Word tokens of formula text.
//!
//! Tokens are maximal runs of word characters (identifiers, predicate and
//! variable names), lower-cased. No stop words are removed: English stop
//! lists would drop meaningful symbols such as `a`, `in` or `is`.

use regex::Regex;
use std::sync::OnceLock;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w+\b").expect("token regex must compile"))
}

pub fn tokenize(text: &str) -> Vec<String> {
    token_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
