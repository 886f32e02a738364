use std::path::{Path, PathBuf};

use dpll_sat::{dimacs, Config, SolveResult, Solver};

/// Every `.dimacs` fixture under `tests/cnf_examples`, collected at test
/// time so new fixtures don't require new test functions.
fn fixtures() -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/cnf_examples");
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("reading {}: {e}", dir.display()))
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "dimacs"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no fixtures found under {}", dir.display());
    paths
}

/// Every fixture's expected outcome is encoded in its file name: `unsat`
/// anywhere in the stem means UNSATISFIABLE, otherwise SATISFIABLE (all
/// current fixtures spell out `sat` or `unsat` directly).
fn expects_unsat(path: &Path) -> bool {
    path.file_stem().unwrap().to_str().unwrap().contains("unsat")
}

fn solve_fixture(path: &Path) -> SolveResult {
    let input = std::fs::read_to_string(path).expect("fixture file is readable");
    let formula = dimacs::parse(&input, true).expect("fixture parses as strict DIMACS");
    Solver::new(formula, Config::default()).solve()
}

#[test]
fn fixture_matches_expected_outcome() {
    for path in fixtures() {
        let result = solve_fixture(&path);
        if expects_unsat(&path) {
            assert!(
                result.is_unsat(),
                "expected UNSATISFIABLE for {}, got {result:?}",
                path.display()
            );
        } else {
            assert!(
                result.is_sat(),
                "expected SATISFIABLE for {}, got {result:?}",
                path.display()
            );
        }
    }
}

#[test]
fn satisfying_model_actually_satisfies_every_clause() {
    for path in fixtures() {
        let SolveResult::Sat(model) = solve_fixture(&path) else {
            continue;
        };

        let raw = std::fs::read_to_string(&path).unwrap();
        let formula = dimacs::parse(&raw, true).unwrap();

        for clause in formula.clauses() {
            let satisfied = clause.iter().any(|lit| {
                let v = lit.var().get() as usize;
                let assigned = model.get(v - 1).copied().unwrap_or(false);
                assigned == lit.is_pos()
            });
            assert!(
                satisfied,
                "model does not satisfy a clause in {}",
                path.display()
            );
        }
    }
}

/// Every satisfiable instance of 3 variables or fewer among the fixtures
/// is checked for soundness by exhaustive search: the solver's model
/// must match *some* row of the truth table, and an UNSAT verdict must
/// mean no row satisfies every clause.
#[test]
fn soundness_by_exhaustive_search_for_small_instances() {
    for path in fixtures() {
        let raw = std::fs::read_to_string(&path).unwrap();
        let formula = dimacs::parse(&raw, true).unwrap();
        let n = formula.num_vars();
        if n > 3 {
            continue;
        }

        let any_satisfying_row = (0u32..(1 << n)).any(|bits| {
            formula.clauses().iter().all(|clause| {
                clause.iter().any(|lit| {
                    let var_idx = lit.var().get() - 1;
                    let bit = (bits >> var_idx) & 1 == 1;
                    bit == lit.is_pos()
                })
            })
        });

        let result = solve_fixture(&path);
        assert_eq!(
            result.is_sat(),
            any_satisfying_row,
            "solver disagreed with exhaustive search on {}",
            path.display()
        );
    }
}
