//! Debug-only state dumps, gated behind `tracing`'s trace level so a
//! release build pays nothing for them (`tracing`'s
//! `release_max_level_info` feature strips `trace!` calls entirely).

use tracing::trace;

use crate::clause::Clause;
use crate::data::{Lit, Value, VarVec};
use crate::solver::Solver;

const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";
const END: &str = "\u{1b}[0m";

fn fmt_lit(lit: Lit, assignment: &VarVec<Value>) -> String {
    let value = assignment[lit.var()];
    if value.satisfies(lit) {
        format!("{GREEN}{lit}{END}")
    } else if value.falsifies(lit) {
        format!("{RED}{lit}{END}")
    } else {
        format!("{lit}")
    }
}

fn fmt_clause(clause: &Clause, assignment: &VarVec<Value>) -> String {
    clause
        .iter()
        .map(|lit| fmt_lit(lit, assignment))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Solver {
    /// Trace-log every clause, with each literal colored by whether it is
    /// currently satisfied (green), falsified (red), or unassigned.
    pub(crate) fn log_state(&self) {
        for clause in self.formula().clauses() {
            trace!("{}", fmt_clause(clause, self.formula().assignment()));
        }
        trace!("trail: {}", self.fmt_trail());
    }

    fn fmt_trail(&self) -> String {
        let entries = self
            .trail()
            .entries()
            .iter()
            .map(|e| {
                let value = if e.value == Value::True { "T" } else { "F" };
                let origin = if e.is_decision { "D" } else { "P" };
                format!("{}={}{origin}", e.var, value)
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{entries}]")
    }
}
