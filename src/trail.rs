//! The assignment trail: an ordered log of variable bindings annotated
//! with decision level and origin.
//!
//! The trail never touches [`crate::formula::Formula`]'s assignment
//! vector itself — see the module docs of [`crate::solver`] for why the
//! two are kept in separate types but mutated only through one path.

use crate::data::{Value, Var};

/// One entry on the [`Trail`]: the tuple `(variable, value, decision_level,
/// is_decision)` from the design.
#[derive(Debug, Clone, Copy)]
pub struct TrailEntry {
    pub var: Var,
    pub value: Value,
    pub decision_level: u32,
    pub is_decision: bool,
}

/// Ordered log of variable bindings. Invariants (checked by tests, relied
/// on by the driver):
///
/// - decision levels are non-decreasing along the trail;
/// - `decision_level` of any entry equals the number of `is_decision`
///   entries at or before it;
/// - level 0 holds only entries with `is_decision = false`.
#[derive(Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
    current_level: u32,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TrailEntry> {
        self.entries.last()
    }

    /// Append an entry. If `is_decision`, the decision level is
    /// incremented first and the new entry gets the post-increment level.
    pub(crate) fn push(&mut self, var: Var, value: Value, is_decision: bool) {
        if is_decision {
            self.current_level += 1;
        }
        self.entries.push(TrailEntry {
            var,
            value,
            decision_level: self.current_level,
            is_decision,
        });
    }

    /// Remove and return the last entry, decrementing the decision level
    /// if it was a decision.
    pub(crate) fn pop(&mut self) -> Option<TrailEntry> {
        let entry = self.entries.pop()?;
        if entry.is_decision {
            self.current_level -= 1;
        }
        Some(entry)
    }

    /// Position (from the top) of the most recent decision entry, if any.
    pub fn last_decision_index(&self) -> Option<usize> {
        self.entries.iter().rposition(|e| e.is_decision)
    }

    /// Index of the first entry with `decision_level > level`, i.e. the
    /// point [`Trail::pop`] must walk back to for `backtrack_to(level)`.
    fn first_index_above(&self, level: u32) -> usize {
        self.entries
            .iter()
            .position(|e| e.decision_level > level)
            .unwrap_or(self.entries.len())
    }

    /// How many entries a `backtrack_to(level)` would pop, without
    /// popping them. Used by callers that need to clear assignment slots
    /// in lockstep with each pop (see [`crate::solver::Solver::assign`]).
    pub fn count_above(&self, level: u32) -> usize {
        self.entries.len() - self.first_index_above(level)
    }

    /// Pop entries until the last remaining entry has level `<= level`;
    /// the current decision level converges to `level` as a consequence
    /// of each popped decision entry decrementing it through [`Trail::pop`].
    ///
    /// Returns the popped entries in pop order (most recently pushed
    /// first), so a caller that also owns a variable assignment vector
    /// (see [`crate::solver::Solver`]) can clear each one's slot in
    /// lockstep.
    pub(crate) fn backtrack_to(&mut self, level: u32) -> Vec<TrailEntry> {
        let mut popped = Vec::with_capacity(self.count_above(level));
        while self.entries.last().is_some_and(|e| e.decision_level > level) {
            popped.push(self.pop().expect("checked non-empty via last()"));
        }
        popped
    }
}
