//! Search strategies over a [`Problem`].
//!
//! Every strategy walks tasks by ending date, places tasks first-fit, leaves
//! the best assignment in `Task::best_assigned_worker`, and hands the problem
//! back with all workers idle and no task assigned.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use clap::ValueEnum;

use crate::assignment::{Placement, SearchState};
use crate::problem::Problem;
use crate::rng::RandomSource;

/// Valid samples collected by the random strategy unless told otherwise.
pub const DEFAULT_RANDOM_SAMPLES: u64 = 2_000_000;
// Samples attempted between deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Skip/assign backtracking over every task.
    Exhaustive,
    /// One pass per worker in ending-date order; counts tasks, not profit.
    Greedy,
    /// Monte-Carlo sampling of task subsets.
    Random,
    /// Try every subset of tasks, then check it.
    Enumerate,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::Greedy => "greedy",
            Strategy::Random => "random",
            Strategy::Enumerate => "enumerate",
        };
        f.write_str(name)
    }
}

/// Limits for [`search_random`].
#[derive(Clone, Copy, Debug)]
pub struct RandomLimits {
    /// Stop after this many feasible samples.
    pub samples: u64,
    /// Stop early once this much wall time has passed.
    pub time_limit: Option<Duration>,
}

/// Outcome of one strategy run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub strategy: Strategy,
    /// Best total profit, or best task count for the greedy strategy.
    pub best_total_profit: i64,
    /// Complete valid assignments examined.
    pub valid_assignments: u64,
    pub profit_histogram: Option<BTreeMap<i64, u64>>,
}

impl SearchResult {
    fn from_state(strategy: Strategy, state: SearchState<'_>) -> Self {
        Self {
            strategy,
            best_total_profit: state.best_total_profit,
            valid_assignments: state.valid_assignments,
            profit_histogram: state.profit_histogram,
        }
    }
}

/// Backtracking over the skip/assign choice of every task.
///
/// Each task is either skipped or given to its first-fit worker; a task with
/// no free worker prunes the assign branch. Worst case 2^T leaves.
pub fn search_exhaustive(problem: &mut Problem, collect_histogram: bool) -> SearchResult {
    problem.sort_for_search();
    let mut state = SearchState::new(problem, collect_histogram);
    explore(&mut state, 0);
    debug_assert_eq!(state.total_profit, 0, "backtracking left profit behind");
    debug_assert!(state.workers.all_idle(), "backtracking left a worker busy");
    let result = SearchResult::from_state(Strategy::Exhaustive, state);
    debug_assert!(problem.is_idle());
    debug_assert_eq!(problem.best_profit(), result.best_total_profit);
    result
}

fn explore(state: &mut SearchState<'_>, index: usize) {
    if index == state.tasks.len() {
        state.record_valid();
        return;
    }
    explore(state, index + 1);
    if let Some(mut placed) = Placement::first_fit(state, index) {
        explore(&mut placed, index + 1);
    }
}

/// Fill worker 0 with every task it can take in ending-date order, then
/// worker 1 with what is left, and so on.
///
/// Profits are ignored: the result is the number of tasks done, which makes
/// it an optimum only for unit profits and a single worker.
pub fn search_greedy(problem: &mut Problem) -> SearchResult {
    problem.sort_for_search();
    let mut state = SearchState::new(problem, false);
    let mut done = 0i64;
    for worker in 0..state.workers.len() {
        for task in state.tasks.iter_mut() {
            if task.assigned_worker.is_none()
                && state.workers.is_eligible(worker, task.starting_date)
            {
                state.workers.acquire(worker, task.ending_date);
                task.assigned_worker = Some(worker);
                task.best_assigned_worker = Some(worker);
                done += 1;
            }
        }
    }
    state.best_total_profit = done;
    state.valid_assignments = 1;
    state.clear_branch();
    let result = SearchResult::from_state(Strategy::Greedy, state);
    debug_assert!(problem.is_idle());
    result
}

/// Draw random task subsets until `limits.samples` feasible ones were seen.
///
/// A subset where some chosen task finds no free worker is thrown away and
/// not counted. Feasible subsets get rare as T grows and the loop has no
/// other bound, so large instances want `limits.time_limit`.
pub fn search_random<R: RandomSource>(
    problem: &mut Problem,
    rng: &mut R,
    limits: RandomLimits,
    collect_histogram: bool,
) -> SearchResult {
    problem.sort_for_search();
    let deadline = limits.time_limit.map(|limit| Instant::now() + limit);
    let mut state = SearchState::new(problem, collect_histogram);
    let mut attempts = 0u64;

    while state.valid_assignments < limits.samples {
        if let Some(deadline) = deadline {
            if attempts % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                tracing::warn!(
                    samples = state.valid_assignments,
                    attempts,
                    "random search stopped at its time limit"
                );
                break;
            }
        }
        attempts += 1;

        state.clear_branch();
        let mut feasible = true;
        for index in 0..state.tasks.len() {
            if rng.next_u30() & 1 == 1 && !state.assign_first_fit(index) {
                feasible = false;
                break;
            }
        }
        if feasible {
            let previous_best = state.best_total_profit;
            state.record_valid();
            if state.best_total_profit > previous_best {
                tracing::debug!(
                    sample = state.valid_assignments,
                    best = state.best_total_profit,
                    "random search improved"
                );
            }
        }
    }

    state.clear_branch();
    let result = SearchResult::from_state(Strategy::Random, state);
    debug_assert!(problem.is_idle());
    debug_assert_eq!(problem.best_profit(), result.best_total_profit);
    result
}

/// Check every subset of tasks by placing its members first-fit.
///
/// Reaches exactly the assignments [`search_exhaustive`] reaches, without
/// pruning, so it is only practical for very small T.
pub fn search_enumerate(problem: &mut Problem, collect_histogram: bool) -> SearchResult {
    problem.sort_for_search();
    let mut state = SearchState::new(problem, collect_histogram);
    let subsets = 1u128 << state.tasks.len();
    for subset in 0..subsets {
        state.clear_branch();
        let feasible = (0..state.tasks.len())
            .filter(|&index| subset & (1u128 << index) != 0)
            .all(|index| state.assign_first_fit(index));
        if feasible {
            state.record_valid();
        }
    }
    state.clear_branch();
    let result = SearchResult::from_state(Strategy::Enumerate, state);
    debug_assert!(problem.is_idle());
    result
}
