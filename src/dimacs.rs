//! DIMACS CNF parsing (§6.1): the thin, well-specified boundary adapter
//! that turns input text into a validated [`Formula`].
//!
//! Clause terminators (`0`) are honored across physical lines, so a
//! clause may span several input lines; this is a strict superset of
//! "one clause per line" and needs no configuration to accept either
//! layout.

use tracing::debug;

use crate::data::Lit;
use crate::error::{FormatError, SolverError};
use crate::formula::Formula;

/// Parse `input` as DIMACS CNF text.
///
/// In strict mode, an empty clause in the input or a mismatch between
/// the declared and actual clause counts is a [`FormatError`]. In
/// lenient mode both are tolerated (an empty clause is simply dropped).
pub fn parse(input: &str, strict: bool) -> Result<Formula, SolverError> {
    let mut problem: Option<(u32, u32)> = None;
    let mut formula: Option<Formula> = None;
    let mut buffer: Vec<i32> = Vec::new();
    let mut clause_start_line: Option<usize> = None;
    let mut raw_clause_count: u32 = 0;
    let mut last_line = 0usize;

    for (idx, raw_line) in input.lines().enumerate() {
        let line = idx + 1;
        last_line = line;
        let trimmed = raw_line.trim_start();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        if trimmed.starts_with('p') {
            if problem.is_some() {
                return Err(FormatError::DuplicateProblemLine { line }.into());
            }

            let (num_vars, num_clauses) = parse_problem_line(trimmed, line)?;
            debug!(num_vars, num_clauses, "parsed DIMACS problem line");
            problem = Some((num_vars, num_clauses));
            formula = Some(Formula::new(num_vars));
            continue;
        }

        let Some((num_vars, _)) = problem else {
            return Err(FormatError::MissingProblemLine { line }.into());
        };
        let formula = formula.as_mut().expect("set alongside `problem`");

        for token in trimmed.split_whitespace() {
            let lit: i32 = token.parse().map_err(|_| FormatError::NonIntegerToken {
                line,
                token: token.to_string(),
            })?;

            if lit == 0 {
                let clause = std::mem::take(&mut buffer);
                clause_start_line = None;
                raw_clause_count += 1;

                if clause.is_empty() {
                    if strict {
                        return Err(FormatError::EmptyClause { line }.into());
                    }
                    continue;
                }

                formula.add_clause(clause.into_iter().map(Lit::new).collect());
                continue;
            }

            if lit.unsigned_abs() > num_vars {
                return Err(FormatError::LiteralOutOfRange {
                    line,
                    lit,
                    num_vars,
                }
                .into());
            }

            if clause_start_line.is_none() {
                clause_start_line = Some(line);
            }
            buffer.push(lit);
        }
    }

    if problem.is_none() {
        return Err(FormatError::MissingProblemLine {
            line: last_line + 1,
        }
        .into());
    }

    if !buffer.is_empty() {
        return Err(FormatError::UnterminatedClause {
            line: clause_start_line.unwrap_or(last_line),
        }
        .into());
    }

    let (_, declared_clauses) = problem.expect("checked above");
    if strict && raw_clause_count != declared_clauses {
        return Err(FormatError::ClauseCountMismatch {
            declared: declared_clauses,
            actual: raw_clause_count,
        }
        .into());
    }

    Ok(formula.expect("set alongside `problem`"))
}

fn parse_problem_line(line: &str, line_no: usize) -> Result<(u32, u32), SolverError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let malformed = || {
        SolverError::from(FormatError::MalformedProblemLine {
            line: line_no,
            text: line.to_string(),
        })
    };

    if tokens.len() != 4 || tokens[0] != "p" || tokens[1] != "cnf" {
        return Err(malformed());
    }

    let num_vars: u32 = tokens[2].parse().map_err(|_| malformed())?;
    let num_clauses: u32 = tokens[3].parse().map_err(|_| malformed())?;

    if num_vars == 0 {
        return Err(malformed());
    }

    Ok((num_vars, num_clauses))
}
