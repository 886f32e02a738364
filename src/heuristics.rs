//! The four decision heuristics from the design: each picks the next
//! variable to branch on, or reports that none remain.
//!
//! All four are reached through one [`DecisionHeuristic`] trait so the
//! driver in [`crate::solver`] does not need to know which one it was
//! configured with.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::data::{Value, Var};
use crate::formula::Formula;

/// Selects the next variable to branch on. Implementations scan only
/// currently unassigned variables and return `None` once every variable
/// has a value.
pub trait DecisionHeuristic {
    fn select(&mut self, formula: &Formula) -> Option<Var>;
}

fn unassigned_vars(formula: &Formula) -> impl Iterator<Item = Var> + '_ {
    (1..=formula.num_vars())
        .map(|v| Var::new(v as i32))
        .filter(move |&v| formula.value_of(v).is_unassigned())
}

/// Smallest unassigned variable index. Deterministic and the cheapest of
/// the four to compute.
#[derive(Default)]
pub struct FirstUnassigned;

impl DecisionHeuristic for FirstUnassigned {
    fn select(&mut self, formula: &Formula) -> Option<Var> {
        unassigned_vars(formula).next()
    }
}

/// The unassigned variable appearing in the most currently-unsatisfied
/// clauses, counting both polarities. Ties broken by smallest index.
#[derive(Default)]
pub struct MostFrequent;

impl DecisionHeuristic for MostFrequent {
    fn select(&mut self, formula: &Formula) -> Option<Var> {
        let assignment = formula.assignment();
        let mut best: Option<(Var, u32)> = None;

        for var in unassigned_vars(formula) {
            let mut occurrences = 0u32;
            for clause in formula.clauses() {
                if clause.is_satisfied(assignment) {
                    continue;
                }
                if clause.iter().any(|lit| lit.var() == var) {
                    occurrences += 1;
                }
            }

            best = Some(match best {
                Some((_, best_count)) if best_count >= occurrences => best.unwrap(),
                _ => (var, occurrences),
            });
        }

        best.map(|(var, _)| var)
    }
}

/// The unassigned variable maximizing the Jeroslow-Wang score
/// `Σ 2^-|C|` over currently-unsatisfied clauses containing it (either
/// polarity). Ties broken by smallest index.
#[derive(Default)]
pub struct JeroslowWang;

impl DecisionHeuristic for JeroslowWang {
    fn select(&mut self, formula: &Formula) -> Option<Var> {
        let assignment = formula.assignment();
        let mut best: Option<(Var, f64)> = None;

        for var in unassigned_vars(formula) {
            let mut score = 0.0;
            for clause in formula.clauses() {
                if clause.is_satisfied(assignment) {
                    continue;
                }
                if clause.iter().any(|lit| lit.var() == var) {
                    score += clause.jw_weight();
                }
            }

            best = Some(match best {
                Some((_, best_score)) if best_score >= score => best.unwrap(),
                _ => (var, score),
            });
        }

        best.map(|(var, _)| var)
    }
}

/// Uniform-random pick among unassigned variables, using a PRNG seeded
/// once at construction (from configuration, or from wall time if none
/// was given) and never reseeded.
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        Random {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DecisionHeuristic for Random {
    fn select(&mut self, formula: &Formula) -> Option<Var> {
        let candidates: Vec<Var> = unassigned_vars(formula).collect();
        if candidates.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..candidates.len());
        Some(candidates[idx])
    }
}

/// Decision value assigned to a freshly-chosen variable: always `True`
/// (no phase-saving).
pub fn default_decision_value() -> Value {
    Value::True
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Lit;

    fn formula_with(n: u32, clauses: &[&[i32]]) -> Formula {
        let mut f = Formula::new(n);
        for &cl in clauses {
            f.add_clause(cl.iter().map(|&i| Lit::new(i)).collect());
        }
        f
    }

    #[test]
    fn first_unassigned_picks_smallest_index() {
        let mut f = formula_with(3, &[&[1, 2, 3]]);
        f.assignment_mut()[Var::new(1)] = Value::True;
        assert_eq!(FirstUnassigned.select(&f), Some(Var::new(2)));
    }

    #[test]
    fn first_unassigned_returns_none_when_complete() {
        let mut f = formula_with(1, &[&[1]]);
        f.assignment_mut()[Var::new(1)] = Value::True;
        assert_eq!(FirstUnassigned.select(&f), None);
    }

    #[test]
    fn most_frequent_counts_only_unsatisfied_clauses() {
        // var 1 appears in two clauses, one of which is already satisfied.
        let mut f = formula_with(2, &[&[1, 2], &[1, -2], &[2]]);
        f.assignment_mut()[Var::new(2)] = Value::True; // satisfies clauses 1 and 3
        // Remaining unsatisfied clause containing var 1: [1, -2]. var 1 occurs once.
        assert_eq!(MostFrequent.select(&f), Some(Var::new(1)));
    }

    #[test]
    fn jeroslow_wang_prefers_shorter_clauses() {
        // var 1 only in a long clause, var 2 only in a unit clause.
        let f = formula_with(3, &[&[1, 2, 3], &[2]]);
        // var2's weight (1.0 from unit clause) dominates var1 and var3.
        assert_eq!(JeroslowWang.select(&f), Some(Var::new(2)));
    }

    #[test]
    fn random_only_ever_returns_unassigned_vars() {
        let mut heuristic = Random::new(Some(42));
        let mut f = formula_with(3, &[&[1, 2, 3]]);
        f.assignment_mut()[Var::new(2)] = Value::True;
        for _ in 0..20 {
            let picked = heuristic.select(&f).unwrap();
            assert_ne!(picked, Var::new(2));
        }
    }

    #[test]
    fn random_is_reproducible_given_the_same_seed() {
        let f = formula_with(5, &[&[1, 2, 3, 4, 5]]);
        let seq_a: Vec<_> = {
            let mut h = Random::new(Some(7));
            (0..5).map(|_| h.select(&f)).collect()
        };
        let seq_b: Vec<_> = {
            let mut h = Random::new(Some(7));
            (0..5).map(|_| h.select(&f)).collect()
        };
        assert_eq!(seq_a, seq_b);
    }
}
