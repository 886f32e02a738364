//! Solver configuration: the knobs the CLI exposes (§6.2) translated into
//! a plain struct the driver reads from, plus the runtime statistics it
//! writes to.

use std::time::Duration;

/// Which decision heuristic (§4.4) the driver should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    First,
    Frequent,
    Jw,
    Random,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Jw
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Strategy::First),
            "frequent" => Ok(Strategy::Frequent),
            "jw" => Ok(Strategy::Jw),
            "random" => Ok(Strategy::Random),
            other => Err(format!(
                "unknown strategy '{other}' (expected one of: first, frequent, jw, random)"
            )),
        }
    }
}

/// Search configuration. `0`/`None` always means "unlimited" — the
/// driver never silently substitutes a default budget, per the design
/// notes' resolution of the source's "0 means 5s/1000 decisions" quirk.
#[derive(Debug, Clone)]
pub struct Config {
    pub strategy: Strategy,
    pub propagation_enabled: bool,
    pub elimination_enabled: bool,
    /// `None` means no wall-clock deadline.
    pub timeout: Option<Duration>,
    /// `None` means no cap on the number of decisions.
    pub decision_budget: Option<u64>,
    /// `None` disables restarts; `Some(n)` restarts after `n` conflicts
    /// since the last restart.
    pub restart_threshold: Option<u64>,
    /// Seed for the `random` strategy. `None` seeds from wall time.
    pub random_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strategy: Strategy::default(),
            propagation_enabled: true,
            elimination_enabled: true,
            timeout: None,
            decision_budget: None,
            restart_threshold: None,
            random_seed: None,
        }
    }
}

/// Counters surfaced to the user via `-s`/`--stats`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub decisions: u64,
    pub propagations: u64,
    pub eliminations: u64,
    pub conflicts: u64,
    pub restarts: u64,
}
