//! The DPLL driver (§4.6): the only place that owns both a [`Formula`]
//! and a [`Trail`], and the only place permitted to mutate either.
//!
//! [`crate::formula::Formula::assignment_mut`] and [`crate::trail::Trail::push`]/
//! [`crate::trail::Trail::pop`]/[`crate::trail::Trail::backtrack_to`] are
//! `pub(crate)` precisely so that every write to a variable's value goes
//! through [`Solver::assign`], [`Solver::unassign_last`], or
//! [`Solver::backtrack_to`] below. Those three methods are the only
//! joint-mutation paths: they update the assignment slot and the trail
//! entry (or entries) together, so the two can never drift out of sync.

use std::time::Instant;

use tracing::debug;

use crate::config::{Config, Stats, Strategy};
use crate::data::{Value, Var};
use crate::formula::Formula;
use crate::heuristics::{
    default_decision_value, DecisionHeuristic, FirstUnassigned, JeroslowWang, MostFrequent, Random,
};
use crate::propagate::StepResult;
use crate::trail::{Trail, TrailEntry};

/// Why the driver stopped without a definite SAT/UNSAT answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownReason {
    Timeout,
    DecisionBudgetExhausted,
}

/// Outcome of [`Solver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveResult {
    /// A satisfying assignment, one `bool` per variable `1..=num_vars`.
    Sat(Vec<bool>),
    Unsat,
    Unknown(UnknownReason),
}

impl SolveResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SolveResult::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, SolveResult::Unsat)
    }
}

/// Owns the formula, the trail, the configured heuristic, and the
/// running statistics for one search.
pub struct Solver {
    formula: Formula,
    trail: Trail,
    config: Config,
    stats: Stats,
    heuristic: Box<dyn DecisionHeuristic>,
    conflicts_since_restart: u64,
}

impl Solver {
    pub fn new(formula: Formula, config: Config) -> Self {
        let heuristic: Box<dyn DecisionHeuristic> = match config.strategy {
            Strategy::First => Box::new(FirstUnassigned),
            Strategy::Frequent => Box::new(MostFrequent),
            Strategy::Jw => Box::new(JeroslowWang),
            Strategy::Random => Box::new(Random::new(config.random_seed)),
        };

        Solver {
            formula,
            trail: Trail::new(),
            config,
            stats: Stats::default(),
            heuristic,
            conflicts_since_restart: 0,
        }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    fn formula_mut(&mut self) -> &mut Formula {
        &mut self.formula
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    /// The sole path by which a variable's value changes during search.
    pub(crate) fn assign(&mut self, var: Var, value: Value, is_decision: bool) {
        self.formula_mut().assignment_mut()[var] = value;
        self.trail.push(var, value, is_decision);
    }

    /// Undo the most recent assignment. The sole inverse of [`Solver::assign`].
    pub(crate) fn unassign_last(&mut self) -> Option<TrailEntry> {
        let entry = self.trail.pop()?;
        self.formula_mut().assignment_mut()[entry.var] = Value::Unassigned;
        Some(entry)
    }

    /// Undo every assignment back to trail level `level` (entries above
    /// it are undone; entries at or below it survive), clearing each
    /// undone variable's assignment slot in lockstep with
    /// [`Trail::backtrack_to`]. Returns the undone entries in pop order
    /// (most recently pushed first).
    fn backtrack_to(&mut self, level: u32) -> Vec<TrailEntry> {
        let popped = self.trail.backtrack_to(level);
        for entry in &popped {
            self.formula_mut().assignment_mut()[entry.var] = Value::Unassigned;
        }
        popped
    }

    /// Chronological backtracking with flip-and-retry. Undoes the most
    /// recent decision level entirely.
    ///
    /// Every fresh decision is pushed at `True` (no phase-saving), which
    /// doubles as the bookkeeping for "has this decision already been
    /// flipped": a decision entry found holding `False` can only be one
    /// that was already flipped once, since nothing else ever pushes a
    /// decision at `False`. So if the located entry is `True`, flip it to
    /// `False` and stop; if it is already `False`, both branches for that
    /// variable are exhausted and the search keeps backing up to the next
    /// most recent decision. Returns `false` once no decision is left to
    /// flip, meaning the formula is UNSAT.
    fn backtrack(&mut self) -> bool {
        loop {
            let current_level = self.trail.current_level();
            if current_level == 0 {
                return false;
            }

            let popped = self.backtrack_to(current_level - 1);
            let entry = *popped
                .last()
                .expect("current_level > 0 implies at least one entry at this level");

            if entry.value == Value::True {
                self.assign(entry.var, Value::False, true);
                return true;
            }
            // entry.value == Value::False: already flipped once, this
            // variable is exhausted; keep backing up.
        }
    }

    /// Undo every assignment down to decision level 0, keeping any
    /// level-0 entries (unit-clause propagations and pure-literal
    /// eliminations that hold regardless of any decision). Used by
    /// restarts, which in this design preserve no learned information
    /// beyond what level 0 already established.
    fn restart(&mut self) {
        self.backtrack_to(0);
        self.conflicts_since_restart = 0;
        self.stats_mut().restarts += 1;
        debug!("restarting search");
    }

    /// Record a conflict and either backtrack or, if a restart is due,
    /// reset to an empty trail instead. Returns `false` only when
    /// backtracking found no decision left to flip (UNSAT).
    fn handle_conflict(&mut self) -> bool {
        self.stats_mut().conflicts += 1;
        self.conflicts_since_restart += 1;

        if let Some(threshold) = self.config.restart_threshold {
            if self.conflicts_since_restart >= threshold && self.trail.last_decision_index().is_some()
            {
                self.restart();
                return true;
            }
        }

        self.backtrack()
    }

    fn budget_exhausted(&self, start: Instant) -> Option<UnknownReason> {
        if let Some(timeout) = self.config.timeout {
            if start.elapsed() >= timeout {
                return Some(UnknownReason::Timeout);
            }
        }
        if let Some(budget) = self.config.decision_budget {
            if self.stats.decisions >= budget {
                return Some(UnknownReason::DecisionBudgetExhausted);
            }
        }
        None
    }

    /// Run DPLL to completion or until a configured budget is exhausted.
    ///
    /// Follows the loop body laid out in the design: budget check,
    /// satisfaction check, conflict check (backtrack on conflict),
    /// propagation, elimination (looping back to the top on progress
    /// before deciding), then a new decision. There is no separate
    /// preprocessing pass — the first iterations, with an empty trail,
    /// run propagation and elimination to fixed point before any decision
    /// is ever pushed, which is exactly what preprocessing would do.
    pub fn solve(&mut self) -> SolveResult {
        let start = Instant::now();

        loop {
            self.log_state();

            if let Some(reason) = self.budget_exhausted(start) {
                return SolveResult::Unknown(reason);
            }

            if self.formula().is_satisfied() {
                let model = self.formula().model();
                debug!(?model, "satisfying assignment found");
                return SolveResult::Sat(model);
            }

            if self.formula().has_conflict() {
                if !self.handle_conflict() {
                    return SolveResult::Unsat;
                }
                continue;
            }

            if self.config.propagation_enabled {
                if let StepResult::Conflict(_) = self.unit_propagate() {
                    if !self.handle_conflict() {
                        return SolveResult::Unsat;
                    }
                    continue;
                }
            }

            if self.config.elimination_enabled {
                match self.eliminate_pure_literals() {
                    StepResult::Conflict(_) => {
                        if !self.handle_conflict() {
                            return SolveResult::Unsat;
                        }
                        continue;
                    }
                    StepResult::Progress => continue,
                    StepResult::Fixed => {}
                }
            }

            match self.heuristic.select(self.formula()) {
                Some(var) => {
                    debug!(%var, "new decision");
                    self.assign(var, default_decision_value(), true);
                    self.stats_mut().decisions += 1;
                    if let Some(budget) = self.config.decision_budget {
                        if self.stats.decisions >= budget {
                            return SolveResult::Unknown(UnknownReason::DecisionBudgetExhausted);
                        }
                    }
                }
                None => {
                    // Structurally unreachable in a correct loop (every
                    // variable assigned without a conflict implies every
                    // clause is satisfied, which the check above already
                    // caught), kept as a defensive re-test per the design.
                    return if self.formula().is_satisfied() {
                        SolveResult::Sat(self.formula().model())
                    } else {
                        SolveResult::Unsat
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Lit;

    fn solver_with(n: u32, clauses: &[&[i32]], config: Config) -> Solver {
        let mut f = Formula::new(n);
        for &cl in clauses {
            f.add_clause(cl.iter().map(|&i| Lit::new(i)).collect());
        }
        Solver::new(f, config)
    }

    #[test]
    fn solves_a_trivial_satisfiable_instance() {
        let mut s = solver_with(1, &[&[1]], Config::default());
        assert_eq!(s.solve(), SolveResult::Sat(vec![true]));
    }

    #[test]
    fn detects_unsatisfiable_instance_via_unit_conflict() {
        let mut s = solver_with(1, &[&[1], &[-1]], Config::default());
        assert_eq!(s.solve(), SolveResult::Unsat);
    }

    #[test]
    fn solves_by_branching_when_propagation_is_not_enough() {
        // (a or b) and (not a or b) and (a or not b): forces b=true, a=true.
        let mut s = solver_with(2, &[&[1, 2], &[-1, 2], &[1, -2]], Config::default());
        match s.solve() {
            SolveResult::Sat(model) => assert!(model[1]),
            other => panic!("expected Sat, got {other:?}"),
        }
    }

    #[test]
    fn detects_unsat_requiring_a_full_branch_and_flip() {
        // Classic unsatisfiable 2-variable instance requiring both
        // branches of the first decision to be explored and fail.
        let clauses: &[&[i32]] = &[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]];
        let mut s = solver_with(2, clauses, Config::default());
        assert_eq!(s.solve(), SolveResult::Unsat);
        assert!(s.stats().decisions >= 1);
        assert!(s.stats().conflicts >= 2);
    }

    #[test]
    fn decision_budget_of_zero_yields_unknown_when_branching_is_required() {
        let mut config = Config::default();
        config.decision_budget = Some(0);
        let mut s = solver_with(2, &[&[1, 2], &[-1, 2], &[1, -2]], config);
        assert_eq!(
            s.solve(),
            SolveResult::Unknown(UnknownReason::DecisionBudgetExhausted)
        );
    }

    #[test]
    fn disabling_propagation_still_reaches_a_correct_answer_via_branching() {
        let mut config = Config::default();
        config.propagation_enabled = false;
        config.elimination_enabled = false;
        let mut s = solver_with(1, &[&[1], &[-1]], config);
        assert_eq!(s.solve(), SolveResult::Unsat);
    }

    #[test]
    fn restart_clears_above_level_zero_but_keeps_level_zero_entries() {
        let mut s = solver_with(3, &[&[1, 2]], Config::default());
        s.assign(Var::new(1), Value::True, false); // level 0, survives
        s.assign(Var::new(2), Value::True, true); // level 1, undone
        s.assign(Var::new(3), Value::True, false); // level 1, undone
        s.restart();
        assert_eq!(s.trail().len(), 1);
        assert_eq!(s.trail().current_level(), 0);
        assert_eq!(s.formula().value_of(Var::new(1)), Value::True);
        assert_eq!(s.formula().value_of(Var::new(2)), Value::Unassigned);
        assert_eq!(s.formula().value_of(Var::new(3)), Value::Unassigned);
        assert_eq!(s.stats().restarts, 1);
    }

    #[test]
    fn backtrack_flips_a_fresh_decision_once() {
        let mut s = solver_with(1, &[&[1]], Config::default());
        s.assign(Var::new(1), Value::True, true);
        assert!(s.backtrack());
        assert_eq!(s.formula().value_of(Var::new(1)), Value::False);
    }

    #[test]
    fn backtrack_reports_unsat_once_every_decision_is_exhausted() {
        let mut s = solver_with(1, &[&[1]], Config::default());
        s.assign(Var::new(1), Value::False, true); // already the flipped value
        assert!(!s.backtrack());
    }
}
