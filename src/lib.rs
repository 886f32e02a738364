//! A DPLL-based SAT solver: unit propagation, pure-literal elimination,
//! chronological backtracking with decision-flip-and-retry, and a choice
//! of four decision heuristics. No clause learning, no watched literals,
//! no non-chronological backjumping, no incremental solving — see
//! [`solver::Solver::solve`] for the driver this crate is built around.

mod clause;
pub mod config;
pub mod data;
pub mod dimacs;
pub mod error;
mod formula;
mod heuristics;
mod log;
mod propagate;
pub mod solver;
mod trail;

pub use config::{Config, Stats, Strategy};
pub use data::{Lit, Value, Var};
pub use error::{FormatError, SolverError};
pub use formula::{AddClauseOutcome, Formula};
pub use heuristics::DecisionHeuristic;
pub use solver::{SolveResult, Solver, UnknownReason};
pub use trail::{Trail, TrailEntry};

/// Parse and solve a DIMACS CNF instance in one call, using `config`.
///
/// A thin convenience wrapper over [`dimacs::parse`] and [`Solver::solve`]
/// for callers that don't need to inspect the parsed [`Formula`] first.
pub fn solve_dimacs(input: &str, strict: bool, config: Config) -> Result<SolveResult, SolverError> {
    let formula = dimacs::parse(input, strict)?;
    let mut solver = Solver::new(formula, config);
    Ok(solver.solve())
}
