//! Mutable search state and scoped task placement.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use crate::problem::Problem;
use crate::types::{Task, WorkerId};
use crate::workers::WorkerPool;

/// State threaded through a search by exclusive reference.
pub struct SearchState<'a> {
    pub tasks: &'a mut [Task],
    pub workers: &'a mut WorkerPool,
    /// Profit of the tasks assigned on the current branch.
    pub total_profit: i64,
    pub best_total_profit: i64,
    pub valid_assignments: u64,
    /// Occurrences of each total profit over valid assignments, if requested.
    pub profit_histogram: Option<BTreeMap<i64, u64>>,
}

impl<'a> SearchState<'a> {
    /// Borrow `problem` for a fresh search with nothing recorded yet.
    pub fn new(problem: &'a mut Problem, collect_histogram: bool) -> Self {
        problem.reset_working_state();
        problem.clear_best();
        Self {
            tasks: &mut problem.tasks,
            workers: &mut problem.workers,
            total_profit: 0,
            best_total_profit: 0,
            valid_assignments: 0,
            profit_histogram: collect_histogram.then(BTreeMap::new),
        }
    }

    /// Count the current branch as a complete valid assignment and keep it
    /// if it beats the best one so far.
    pub fn record_valid(&mut self) {
        self.valid_assignments += 1;
        if let Some(histogram) = self.profit_histogram.as_mut() {
            *histogram.entry(self.total_profit).or_insert(0) += 1;
        }
        if self.total_profit > self.best_total_profit {
            self.best_total_profit = self.total_profit;
            for task in self.tasks.iter_mut() {
                task.best_assigned_worker = task.assigned_worker;
            }
        }
    }

    /// Place task `index` on its first-fit worker without an undo scope.
    /// Returns false, leaving the state untouched, when no worker is free.
    pub fn assign_first_fit(&mut self, index: usize) -> bool {
        let task = &mut self.tasks[index];
        match self.workers.first_eligible(task.starting_date) {
            Some(worker) => {
                self.workers.acquire(worker, task.ending_date);
                task.assigned_worker = Some(worker);
                self.total_profit += i64::from(task.profit);
                true
            }
            None => false,
        }
    }

    /// Drop every placement made on the current branch.
    pub fn clear_branch(&mut self) {
        for task in self.tasks.iter_mut() {
            task.assigned_worker = None;
        }
        self.workers.reset();
        self.total_profit = 0;
    }
}

/// A speculative first-fit placement of one task.
///
/// The worker's busy date, the task's assignment and the running profit are
/// put back when the guard is dropped.
pub struct Placement<'s, 'a> {
    state: &'s mut SearchState<'a>,
    task: usize,
    worker: WorkerId,
    previous_busy: i32,
    previous_assignment: Option<WorkerId>,
    previous_profit: i64,
}

impl<'s, 'a> Placement<'s, 'a> {
    /// Place task `index` on the lowest-indexed eligible worker, or return
    /// `None` when the branch has to be pruned.
    pub fn first_fit(state: &'s mut SearchState<'a>, index: usize) -> Option<Self> {
        let (starting_date, ending_date, profit) = {
            let task = &state.tasks[index];
            (task.starting_date, task.ending_date, task.profit)
        };
        let worker = state.workers.first_eligible(starting_date)?;
        let previous_busy = state.workers.acquire(worker, ending_date);
        let previous_assignment = state.tasks[index].assigned_worker.replace(worker);
        let previous_profit = state.total_profit;
        state.total_profit += i64::from(profit);
        Some(Self {
            state,
            task: index,
            worker,
            previous_busy,
            previous_assignment,
            previous_profit,
        })
    }
}

impl<'a> Deref for Placement<'_, 'a> {
    type Target = SearchState<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.state
    }
}

impl<'a> DerefMut for Placement<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.state
    }
}

impl Drop for Placement<'_, '_> {
    fn drop(&mut self) {
        self.state.workers.release(self.worker, self.previous_busy);
        self.state.tasks[self.task].assigned_worker = self.previous_assignment;
        self.state.total_profit = self.previous_profit;
    }
}
