//! The error taxonomy from §7: I/O failures at the boundary, DIMACS
//! format errors (with subkinds), and the fatal internal-invariant
//! variant. `Timeout`/`BudgetExhausted` are deliberately *not* here —
//! they are expected terminal states, surfaced as
//! [`crate::solver::SolveResult::Unknown`], not failures.

use thiserror::Error;

/// A DIMACS parsing failure, with the line it was detected on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: expected 'p cnf <vars> <clauses>' before any clause line")]
    MissingProblemLine { line: usize },

    #[error("line {line}: duplicate problem line")]
    DuplicateProblemLine { line: usize },

    #[error("line {line}: malformed problem line '{text}'")]
    MalformedProblemLine { line: usize, text: String },

    #[error("line {line}: expected an integer, found '{token}'")]
    NonIntegerToken { line: usize, token: String },

    #[error("line {line}: literal {lit} out of range for {num_vars} declared variables")]
    LiteralOutOfRange {
        line: usize,
        lit: i32,
        num_vars: u32,
    },

    #[error("line {line}: clause not terminated by 0 before end of input")]
    UnterminatedClause { line: usize },

    #[error("line {line}: empty clause (formula is trivially unsatisfiable)")]
    EmptyClause { line: usize },

    #[error("clause count mismatch: problem line declared {declared}, found {actual}")]
    ClauseCountMismatch { declared: u32, actual: u32 },
}

/// Top-level error type returned at the boundary (parsing, I/O) and by
/// any checked internal invariant.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("could not read file {path}: {source}")]
    FileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("DIMACS format error: {0}")]
    Format(#[from] FormatError),

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}
