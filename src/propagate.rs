//! Unit propagation and pure-literal elimination.
//!
//! Both operations are expressed as methods on [`Solver`] because both
//! push entries onto the trail, which must happen through
//! [`Solver::assign`] to keep the trail and the formula's assignment
//! vector in lockstep (see the module docs of [`crate::solver`]).

use crate::data::Value;
use crate::solver::Solver;

/// Outcome of one propagation or elimination attempt. Resolves the open
/// question in the design notes: rather than a bare boolean, callers get
/// an explicit three-way result so "no progress" and "conflict" are never
/// conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// No assignment could be made; the formula did not change.
    Fixed,
    /// At least one assignment was pushed, no conflict was found.
    Progress,
    /// A unit clause's literal was already assigned to the opposite
    /// value. The index of the falsified clause is attached for logging.
    Conflict(usize),
}

impl Solver {
    /// Repeatedly scan all clauses for a unit clause and assign its unit
    /// literal, until a pass makes no new assignment or a conflict
    /// surfaces. Returns `Progress` if any assignment was made before
    /// reaching fixed point or a conflict, even if a later pass finds the
    /// conflict; `Fixed` only if the very first pass finds nothing to do.
    pub(crate) fn unit_propagate(&mut self) -> StepResult {
        let mut made_progress = false;

        loop {
            let mut pushed_this_pass = false;

            for idx in 0..self.formula().clauses().len() {
                let clause = &self.formula().clauses()[idx];

                // Checked first and independently of `is_unit`: a clause
                // with zero unassigned literals and no satisfying literal
                // is a conflict, not a unit clause, and `is_unit` reports
                // `None` for it just like it would for a satisfied clause.
                if clause.is_conflicting(self.formula().assignment()) {
                    return StepResult::Conflict(idx);
                }
                if clause.is_satisfied(self.formula().assignment()) {
                    continue;
                }
                let Some(unit_lit) = clause.is_unit(self.formula().assignment()) else {
                    continue;
                };

                let var = unit_lit.var();
                let value = Value::from_bool(unit_lit.is_pos());
                self.assign(var, value, false);
                self.stats_mut().propagations += 1;
                pushed_this_pass = true;
                made_progress = true;
            }

            if !pushed_this_pass {
                break;
            }
        }

        if made_progress {
            StepResult::Progress
        } else {
            StepResult::Fixed
        }
    }

    /// One full sweep over all currently-unassigned variables: if a
    /// variable occurs with only one polarity across currently
    /// unsatisfied clauses, assign it that polarity. Does not iterate to
    /// convergence; the driver re-invokes as needed.
    pub(crate) fn eliminate_pure_literals(&mut self) -> StepResult {
        let num_vars = self.formula().num_vars();
        let mut made_progress = false;

        for v in 1..=num_vars {
            let var = crate::data::Var::new(v as i32);
            if !self.formula().value_of(var).is_unassigned() {
                continue;
            }

            let mut seen_pos = false;
            let mut seen_neg = false;

            for clause in self.formula().clauses() {
                if clause.is_satisfied(self.formula().assignment()) {
                    continue;
                }
                for lit in clause.iter() {
                    if lit.var() != var {
                        continue;
                    }
                    if lit.is_pos() {
                        seen_pos = true;
                    } else {
                        seen_neg = true;
                    }
                }
                if seen_pos && seen_neg {
                    break;
                }
            }

            match (seen_pos, seen_neg) {
                (true, false) => {
                    self.assign(var, Value::True, false);
                    self.stats_mut().eliminations += 1;
                    made_progress = true;
                }
                (false, true) => {
                    self.assign(var, Value::False, false);
                    self.stats_mut().eliminations += 1;
                    made_progress = true;
                }
                _ => {}
            }
        }

        // Pure-literal assignments can never falsify a clause (a clause
        // containing a pure literal's variable only at one polarity
        // cannot be conflicting in that polarity), but the design calls
        // for a defensive check since the driver treats eliminate's
        // result the same way it treats propagate's.
        if self.formula().has_conflict() {
            return StepResult::Conflict(usize::MAX);
        }

        if made_progress {
            StepResult::Progress
        } else {
            StepResult::Fixed
        }
    }
}
