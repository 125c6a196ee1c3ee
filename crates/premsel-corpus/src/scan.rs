//! Character-level statement scanning.
//!
//! A regex alone cannot split TPTP statements: bodies nest parentheses and
//! quoted atoms may contain `(`, `)`, `,` or `.`. The scanner tracks nesting
//! depth and quote state, and a statement ends at a `.` seen at depth zero.

use premsel_kernel::{Dialect, Role};
use regex::Regex;
use std::sync::OnceLock;

/// A statement cut out of the source text, not yet classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement {
    pub text: String,
    /// 1-based line of the first non-blank character.
    pub line: usize,
}

/// The three top-level fields of an annotated formula, plus anything after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub dialect: Dialect,
    pub name: String,
    pub role: Role,
    pub body: String,
    pub annotations: Option<String>,
}

/// What a completed raw statement turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Formula(Statement),
    /// An `include(...)` directive; handled by the include scanner.
    Include,
    Malformed(String),
}

/// Blank out `%` line comments and `/* */` block comments that sit outside
/// quoted atoms. Newlines are kept so line numbers survive.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            // Quoted atoms never span lines.
            if c == '\n' {
                quote = None;
            } else if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                out.push(c);
            }
            '%' => {
                for rest in chars.by_ref() {
                    if rest == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for rest in chars.by_ref() {
                    if rest == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && rest == '/' {
                        break;
                    }
                    prev = rest;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Split comment-free text into statements at depth-zero `.` terminators.
///
/// Returns the completed statements and, separately, fragments that could
/// not be closed (unbalanced `)`, text left over at end of input, or an open
/// bracket or quote cut off by a new statement at the start of a line).
pub fn split_statements(source: &str) -> (Vec<RawStatement>, Vec<RawStatement>) {
    let mut statements = Vec::new();
    let mut broken = Vec::new();

    let mut buffer = String::new();
    let mut start_line = 0usize;
    let mut line = 1usize;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = source.char_indices();

    while let Some((idx, c)) = chars.next() {
        if buffer.trim().is_empty() && !c.is_whitespace() {
            start_line = line;
        }
        if c == '\n' {
            line += 1;
            if (depth > 0 || quote.is_some()) && statement_start_re().is_match(&source[idx + 1..]) {
                broken.push(RawStatement {
                    text: buffer.trim().to_string(),
                    line: start_line,
                });
                buffer.clear();
                depth = 0;
                quote = None;
                continue;
            }
        }

        if let Some(q) = quote {
            buffer.push(c);
            if c == '\\' {
                if let Some((_, escaped)) = chars.next() {
                    if escaped == '\n' {
                        line += 1;
                    }
                    buffer.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                buffer.push(c);
            }
            '(' | '[' => {
                depth += 1;
                buffer.push(c);
            }
            ')' | ']' => {
                buffer.push(c);
                if depth == 0 {
                    broken.push(RawStatement {
                        text: buffer.trim().to_string(),
                        line: start_line,
                    });
                    buffer.clear();
                } else {
                    depth -= 1;
                }
            }
            '.' if depth == 0 => {
                let text = buffer.trim();
                if !text.is_empty() {
                    statements.push(RawStatement {
                        text: text.to_string(),
                        line: start_line,
                    });
                }
                buffer.clear();
            }
            _ => buffer.push(c),
        }
    }

    if !buffer.trim().is_empty() {
        broken.push(RawStatement {
            text: buffer.trim().to_string(),
            line: start_line,
        });
    }

    (statements, broken)
}

/// A statement keyword followed by `(` at the very start of the text.
fn statement_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:fof|cnf|tff|thf|include)\s*\(").expect("statement start regex must compile")
    })
}

fn statement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^([a-z_]+)\s*\((.*)\)$").expect("statement regex must compile")
    })
}

fn role_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z][a-z_]*$").expect("role regex must compile"))
}

/// Classify one raw statement (without its terminating `.`).
pub fn classify(raw: &str) -> Classified {
    let Some(caps) = statement_re().captures(raw) else {
        return Classified::Malformed("expected `keyword( ... )`".to_string());
    };
    let keyword = &caps[1];
    if keyword == "include" {
        return Classified::Include;
    }
    let Ok(dialect) = keyword.parse::<Dialect>() else {
        return Classified::Malformed(format!("unknown statement keyword `{keyword}`"));
    };

    let inner = caps.get(2).map_or("", |m| m.as_str());
    let commas = top_level_commas(inner);
    if commas.len() < 2 {
        return Classified::Malformed("expected name, role and formula fields".to_string());
    }

    let name = inner[..commas[0]].trim();
    let role = inner[commas[0] + 1..commas[1]].trim();
    let (body, annotations) = match commas.get(2) {
        Some(&third) => (
            inner[commas[1] + 1..third].trim(),
            Some(inner[third + 1..].trim()).filter(|rest| !rest.is_empty()),
        ),
        None => (inner[commas[1] + 1..].trim(), None),
    };

    if name.is_empty() {
        return Classified::Malformed("empty formula name".to_string());
    }
    if !role_re().is_match(role) {
        return Classified::Malformed(format!("invalid role `{role}`"));
    }
    if body.is_empty() {
        return Classified::Malformed("empty formula body".to_string());
    }

    Classified::Formula(Statement {
        dialect,
        name: name.to_string(),
        role: Role::from(role),
        body: body.to_string(),
        annotations: annotations.map(str::to_string),
    })
}

/// Byte offsets of commas outside any bracket or quote.
fn top_level_commas(inner: &str) -> Vec<usize> {
    let mut commas = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in inner.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => commas.push(idx),
            _ => {}
        }
    }

    commas
}
