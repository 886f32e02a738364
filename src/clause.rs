//! Clause representation and the four predicates ([`Clause::is_satisfied`],
//! [`Clause::is_conflicting`], [`Clause::is_unit`], tautology filtering at
//! construction) the rest of the engine is built on.

use crate::data::{Lit, Value, VarVec};

/// A clause: a disjunction of literals, normalised at construction time.
///
/// Construction collapses duplicate literals and rejects tautologies (a
/// clause containing both `v` and `¬v`). A `Clause` that exists has at
/// least one literal and is never a tautology; both properties are
/// invariants enforced once, here, rather than re-checked by every
/// consumer.
#[derive(Debug, Clone)]
pub struct Clause {
    lits: Vec<Lit>,
}

/// Outcome of attempting to build a [`Clause`] from raw literals.
pub enum ClauseBuild {
    /// A normal, storable clause.
    Clause(Clause),
    /// The input was a tautology; it must be dropped, not stored.
    Tautology,
    /// The input had zero literals after normalisation.
    Empty,
}

impl Clause {
    /// Normalise `lits` (sort-dedup by variable, detect opposite
    /// polarities) and classify the result.
    pub fn build(mut lits: Vec<Lit>) -> ClauseBuild {
        lits.sort_by_key(|l| l.get());
        lits.dedup();

        let is_tautology = lits.windows(2).any(|pair| pair[0].var() == pair[1].var());

        if is_tautology {
            return ClauseBuild::Tautology;
        }

        if lits.is_empty() {
            return ClauseBuild::Empty;
        }

        ClauseBuild::Clause(Clause { lits })
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.lits.iter().copied()
    }

    /// Jeroslow-Wang weight `2^-|C|` of this clause, used by the
    /// Jeroslow-Wang decision heuristic.
    pub fn jw_weight(&self) -> f64 {
        2f64.powi(-(self.lits.len() as i32))
    }

    /// True iff some literal evaluates to true under `assignment`.
    pub fn is_satisfied(&self, assignment: &VarVec<Value>) -> bool {
        self.lits
            .iter()
            .any(|&lit| assignment[lit.var()].satisfies(lit))
    }

    /// True iff every literal evaluates to false under `assignment`.
    pub fn is_conflicting(&self, assignment: &VarVec<Value>) -> bool {
        self.lits
            .iter()
            .all(|&lit| assignment[lit.var()].falsifies(lit))
    }

    /// If this clause is unit under `assignment` (not satisfied, exactly
    /// one unassigned literal, all others false), returns that literal.
    pub fn is_unit(&self, assignment: &VarVec<Value>) -> Option<Lit> {
        let mut unassigned = None;

        for &lit in &self.lits {
            let value = assignment[lit.var()];
            if value.satisfies(lit) {
                return None;
            }
            if value.is_unassigned() {
                if unassigned.is_some() {
                    return None;
                }
                unassigned = Some(lit);
            }
        }

        unassigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(lits: &[i32]) -> Clause {
        match Clause::build(lits.iter().map(|&i| Lit::new(i)).collect()) {
            ClauseBuild::Clause(c) => c,
            _ => panic!("expected a storable clause from {lits:?}"),
        }
    }

    fn assignment(n: u32, set: &[(i32, bool)]) -> VarVec<Value> {
        let mut a = VarVec::new();
        for v in 1..=n {
            a.expand(crate::data::Var::new(v as i32), Value::Unassigned);
        }
        for &(v, b) in set {
            a[crate::data::Var::new(v)] = Value::from_bool(b);
        }
        a
    }

    #[test]
    fn tautology_is_rejected() {
        assert!(matches!(
            Clause::build(vec![Lit::new(1), Lit::new(-1)]),
            ClauseBuild::Tautology
        ));
    }

    #[test]
    fn duplicate_literals_collapse() {
        let c = clause(&[1, 2, 1]);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn empty_input_is_flagged_empty() {
        assert!(matches!(Clause::build(vec![]), ClauseBuild::Empty));
    }

    #[test]
    fn satisfied_when_any_literal_true() {
        let c = clause(&[1, -2, 3]);
        let a = assignment(3, &[(2, false)]);
        assert!(c.is_satisfied(&a));
        assert!(c.is_unit(&a).is_none());
    }

    #[test]
    fn conflicting_when_all_literals_false() {
        let c = clause(&[1, -2]);
        let a = assignment(2, &[(1, false), (2, true)]);
        assert!(c.is_conflicting(&a));
        assert!(!c.is_satisfied(&a));
    }

    #[test]
    fn unit_detects_the_sole_unassigned_literal() {
        let c = clause(&[1, -2, 3]);
        let a = assignment(3, &[(1, false), (2, true)]);
        assert_eq!(c.is_unit(&a), Some(Lit::new(3)));
    }

    #[test]
    fn not_unit_with_two_unassigned_literals() {
        let c = clause(&[1, -2, 3]);
        let a = assignment(3, &[(1, false)]);
        assert!(c.is_unit(&a).is_none());
    }
}
