use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dpll_sat::{dimacs, Config, SolveResult, Solver, SolverError, Strategy, UnknownReason};

/// A DPLL-based SAT solver for DIMACS CNF input.
#[derive(Parser)]
#[command(name = "solver", version)]
struct Args {
    /// DIMACS CNF file to solve.
    file: PathBuf,

    /// Enable progress logging (to stderr).
    #[arg(short, long)]
    verbose: bool,

    /// Print the decoded model in human form when SAT.
    #[arg(short, long)]
    assignment: bool,

    /// Print decisions, propagations, conflicts, restarts, elapsed time.
    #[arg(short, long)]
    stats: bool,

    /// Wall-clock deadline in seconds; 0 means none.
    #[arg(short, long, default_value_t = 0)]
    timeout: u64,

    /// Decision budget; 0 means none.
    #[arg(short, long, default_value_t = 0)]
    decisions: u64,

    /// Decision heuristic.
    #[arg(long, default_value = "jw")]
    strategy: Strategy,

    /// Parse DIMACS in lenient mode.
    #[arg(long)]
    lenient: bool,

    /// Disable unit propagation.
    #[arg(long)]
    no_propagation: bool,

    /// Disable pure-literal elimination.
    #[arg(long)]
    no_elimination: bool,

    /// Enable restarts with the given conflict threshold.
    #[arg(long)]
    restart_threshold: Option<u64>,

    /// Seed for the `random` strategy's PRNG.
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<ExitCode, SolverError> {
    let input = std::fs::read_to_string(&args.file).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SolverError::FileNotFound {
                path: args.file.display().to_string(),
            }
        } else {
            SolverError::FileUnreadable {
                path: args.file.display().to_string(),
                source,
            }
        }
    })?;

    let formula = dimacs::parse(&input, !args.lenient)?;

    let config = Config {
        strategy: args.strategy,
        propagation_enabled: !args.no_propagation,
        elimination_enabled: !args.no_elimination,
        timeout: (args.timeout > 0).then(|| Duration::from_secs(args.timeout)),
        decision_budget: (args.decisions > 0).then_some(args.decisions),
        restart_threshold: args.restart_threshold,
        random_seed: args.seed,
    };

    let start = Instant::now();
    let mut solver = Solver::new(formula, config);
    let result = solver.solve();
    let elapsed = start.elapsed();

    let exit_code = match &result {
        SolveResult::Sat(model) => {
            println!("s SATISFIABLE");
            if args.assignment {
                for (i, &bit) in model.iter().enumerate() {
                    println!("{} = {}", i + 1, bit as u8);
                }
            }
            ExitCode::from(10)
        }
        SolveResult::Unsat => {
            println!("s UNSATISFIABLE");
            ExitCode::from(20)
        }
        SolveResult::Unknown(reason) => {
            println!("s UNKNOWN");
            match reason {
                UnknownReason::Timeout => tracing::info!("stopped: timeout"),
                UnknownReason::DecisionBudgetExhausted => {
                    tracing::info!("stopped: decision budget exhausted")
                }
            }
            ExitCode::from(0)
        }
    };

    if args.stats {
        let stats = solver.stats();
        println!("c decisions {}", stats.decisions);
        println!("c propagations {}", stats.propagations);
        println!("c conflicts {}", stats.conflicts);
        println!("c restarts {}", stats.restarts);
        println!("c elapsed_ms {}", elapsed.as_millis());
    }

    Ok(exit_code)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
