//! The CNF formula: a clause set plus the dense, variable-indexed
//! assignment vector the whole engine mutates in place.

use crate::clause::{Clause, ClauseBuild};
use crate::data::{Lit, Value, Var, VarVec};

/// What happened when a raw clause was handed to [`Formula::add_clause`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddClauseOutcome {
    /// The clause was normalised and stored.
    Stored,
    /// The clause was a tautology and was silently dropped.
    Tautology,
    /// The clause had no literals after normalisation.
    Empty,
}

/// Owns the clause set and the assignment vector for a single CNF
/// instance. The solver (see [`crate::solver::Solver`]) mutates
/// [`Formula::assignment`] but never the clause set once parsing is done.
pub struct Formula {
    clauses: Vec<Clause>,
    assignment: VarVec<Value>,
    num_vars: u32,
}

impl Formula {
    /// An empty formula over `num_vars` variables, all unassigned.
    pub fn new(num_vars: u32) -> Self {
        let mut assignment = VarVec::new();
        if num_vars > 0 {
            assignment.expand(Var::new(num_vars as i32), Value::Unassigned);
        }
        Formula {
            clauses: Vec::new(),
            assignment,
            num_vars,
        }
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn assignment(&self) -> &VarVec<Value> {
        &self.assignment
    }

    /// Crate-visible so only [`crate::solver::Solver`] mutates individual
    /// slots; see the single-mutator rule in the module docs of
    /// [`crate::solver`].
    pub(crate) fn assignment_mut(&mut self) -> &mut VarVec<Value> {
        &mut self.assignment
    }

    /// Normalise and store `lits` as a new clause, growing the assignment
    /// vector if it references a variable beyond the declared range.
    ///
    /// `OutOfMemory` from §7 of the design is not modeled as a `Result`
    /// here: Rust's global allocator aborts the process on allocation
    /// failure rather than returning one, so there is nothing for this
    /// method to catch and propagate.
    pub fn add_clause(&mut self, lits: Vec<Lit>) -> AddClauseOutcome {
        for &lit in &lits {
            let var = lit.var();
            if var.get() > self.num_vars {
                self.num_vars = var.get();
            }
            self.assignment.expand(var, Value::Unassigned);
        }

        match Clause::build(lits) {
            ClauseBuild::Clause(clause) => {
                self.clauses.push(clause);
                AddClauseOutcome::Stored
            }
            ClauseBuild::Tautology => AddClauseOutcome::Tautology,
            ClauseBuild::Empty => AddClauseOutcome::Empty,
        }
    }

    /// True iff every stored clause is satisfied under the current
    /// assignment.
    pub fn is_satisfied(&self) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied(&self.assignment))
    }

    /// True iff at least one stored clause is falsified under the
    /// current assignment.
    pub fn has_conflict(&self) -> bool {
        self.clauses.iter().any(|c| c.is_conflicting(&self.assignment))
    }

    /// Value currently assigned to `var`.
    pub fn value_of(&self, var: Var) -> Value {
        self.assignment[var]
    }

    /// Decoded model: for each variable `1..=num_vars`, `true` if it is
    /// `True`, `false` if `False` or still `Unassigned`.
    pub fn model(&self) -> Vec<bool> {
        (1..=self.num_vars)
            .map(|v| matches!(self.value_of(Var::new(v as i32)), Value::True))
            .collect()
    }
}
