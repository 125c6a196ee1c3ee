//! Render a reduced TPTP problem from a goal and selected premises.

use crate::corpus::Goal;
use premsel_kernel::Formula;
use std::fmt::Write;

/// Build a self-contained problem: header comments, premises in the given
/// order, then the goal formulas. Annotations are dropped.
pub fn build_problem(problem_name: &str, goal: &Goal<'_>, premises: &[&Formula]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "% Problem  : {problem_name}");
    let _ = writeln!(out, "% Premises : {}", premises.len());
    let _ = writeln!(out, "% Goal     : {}", goal.names().join(", "));
    out.push('\n');
    for formula in premises.iter().chain(goal.formulas()) {
        out.push_str(&formula.to_tptp());
        out.push('\n');
    }
    out
}
