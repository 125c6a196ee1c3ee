//! Verdict extraction from prover stdout.
//!
//! The status comes from the first `SZS status <word>` line. The positive
//! premises are the `file('<source>', <name>)` citations inside the
//! `SZS output start CNFRefutation` block; a block with no end marker runs to
//! the end of the text, which covers output cut short by a killed process.

use premsel_kernel::{ProverVerdict, SzsStatus};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

pub const REFUTATION_START: &str = "SZS output start CNFRefutation";
pub const REFUTATION_END: &str = "SZS output end CNFRefutation";

fn status_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"SZS\s+status\s+(\w+)").expect("status regex must compile"))
}

fn file_source_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"file\('[^']*',\s*(\w+)\)").expect("file-source regex must compile")
    })
}

/// The first reported SZS status, or `Unknown`.
pub fn szs_status(stdout: &str) -> SzsStatus {
    status_re()
        .captures(stdout)
        .map(|caps| SzsStatus::from(&caps[1]))
        .unwrap_or(SzsStatus::Unknown)
}

/// The text between the refutation markers, if a refutation was printed.
pub fn refutation_block(stdout: &str) -> Option<&str> {
    let start = stdout.find(REFUTATION_START)? + REFUTATION_START.len();
    let rest = &stdout[start..];
    Some(match rest.find(REFUTATION_END) {
        Some(end) => &rest[..end],
        None => rest,
    })
}

/// Names cited through `file(...)` sources, sorted and deduplicated.
pub fn cited_premises(block: &str) -> BTreeSet<String> {
    file_source_re()
        .captures_iter(block)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Derive the verdict for one prover run from its stdout alone.
pub fn extract_verdict(stdout: &str) -> ProverVerdict {
    let status = szs_status(stdout);
    let positives = refutation_block(stdout)
        .map(cited_premises)
        .unwrap_or_default();
    ProverVerdict::new(status, positives, stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPROVER_LOG: &str = "\
# Proof found!
# SZS status Theorem
# SZS output start CNFRefutation
fof(pel55_4, axiom, ![X1, X2]:((killed(X1,X2)=>hates(X1,X2))), file('PUZ001+1.p', pel55_4)).
fof(pel55_1, axiom, ?[X1]:((lives(X1)&killed(X1,agatha))), file('PUZ001+1.p', pel55_1)).
fof(pel55, conjecture, killed(agatha,agatha), file('PUZ001+1.p', pel55)).
fof(c_0_3, negated_conjecture, ~killed(agatha,agatha), inference(assume_negation,[status(cth)],[pel55])).
fof(pel55_4b, axiom, ![X1, X2]:((killed(X1,X2)=>hates(X1,X2))), file('PUZ001+1.p', pel55_4)).
# SZS output end CNFRefutation
fof(after, axiom, p, file('PUZ001+1.p', not_in_block)).
";

    #[test]
    fn theorem_with_refutation() {
        let verdict = extract_verdict(EPROVER_LOG);
        assert_eq!(verdict.status(), &SzsStatus::Theorem);
        assert!(verdict.is_proved());
        assert_eq!(verdict.positive_axioms(), ["pel55", "pel55_1", "pel55_4"]);
        insta::assert_json_snapshot!(verdict, @r#"
        {
          "status": "Theorem",
          "proved": true,
          "positive_axioms": [
            "pel55",
            "pel55_1",
            "pel55_4"
          ]
        }
        "#);
    }

    #[test]
    fn two_cited_axioms_come_back_sorted() {
        let stdout = "# SZS status Theorem\n# SZS output start CNFRefutation\n\
                      cnf(c1, axiom, q, file('p.p', ax2)).\n\
                      cnf(c2, axiom, p, file('p.p', ax1)).\n\
                      # SZS output end CNFRefutation\n";
        let verdict = extract_verdict(stdout);
        assert_eq!(verdict.status().as_str(), "Theorem");
        assert!(verdict.is_proved());
        assert_eq!(verdict.positive_axioms(), ["ax1", "ax2"]);
    }

    #[test]
    fn missing_status_is_unknown() {
        let verdict = extract_verdict("eprover: cannot open file\n");
        assert_eq!(verdict.status(), &SzsStatus::Unknown);
        assert!(!verdict.is_proved());
        assert!(verdict.positive_axioms().is_empty());
    }

    #[test]
    fn counter_satisfiable_is_not_proved() {
        let verdict = extract_verdict("# SZS status CounterSatisfiable\n");
        assert_eq!(verdict.status(), &SzsStatus::CounterSatisfiable);
        assert!(!verdict.is_proved());
    }

    #[test]
    fn unsatisfiable_is_proved() {
        assert!(extract_verdict("% SZS status Unsatisfiable for PUZ001-1\n").is_proved());
    }

    #[test]
    fn truncated_block_runs_to_end_of_text() {
        let stdout = "# SZS status Theorem\n# SZS output start CNFRefutation\n\
                      cnf(c1, axiom, q, file('p.p', ax7)).\ncnf(c2, ax";
        assert_eq!(extract_verdict(stdout).positive_axioms(), ["ax7"]);
    }

    #[test]
    fn no_block_means_no_positives() {
        let verdict = extract_verdict("# SZS status Theorem\n# Proof found!\n");
        assert!(verdict.is_proved());
        assert!(verdict.positive_axioms().is_empty());
        assert_eq!(refutation_block("# SZS status Theorem\n"), None);
    }

    #[test]
    fn first_status_line_wins() {
        assert_eq!(
            szs_status("# SZS status GaveUp\n# SZS status Theorem\n"),
            SzsStatus::GaveUp
        );
    }
}
