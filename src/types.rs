//! Shared identifiers and task model used across the search.

use std::cmp::Ordering;

/// Index of a worker in `0..P`.
pub type WorkerId = usize;

/// Maximum number of tasks in one problem.
pub const MAX_T: usize = 64;
/// Maximum number of workers in one problem.
pub const MAX_P: usize = 10;
/// `busy_until` value of a worker that has not been given any task.
pub const IDLE: i32 = -1;

/// A unit of work with an inclusive date interval and a profit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub starting_date: i32,
    /// Inclusive; a worker is busy through this date.
    pub ending_date: i32,
    pub profit: i32,
    /// Worker holding this task on the branch currently being explored.
    pub assigned_worker: Option<WorkerId>,
    /// Worker holding this task in the best assignment found so far.
    pub best_assigned_worker: Option<WorkerId>,
}

impl Task {
    /// Construct an unassigned task.
    pub fn new(starting_date: i32, ending_date: i32, profit: i32) -> Self {
        debug_assert!(starting_date <= ending_date, "task interval is reversed");
        Self {
            starting_date,
            ending_date,
            profit,
            assigned_worker: None,
            best_assigned_worker: None,
        }
    }

    /// Display order: starting date, then ending date.
    pub fn by_start(a: &Task, b: &Task) -> Ordering {
        (a.starting_date, a.ending_date).cmp(&(b.starting_date, b.ending_date))
    }

    /// Search order: ending date, then starting date.
    pub fn by_end(a: &Task, b: &Task) -> Ordering {
        (a.ending_date, a.starting_date).cmp(&(b.ending_date, b.starting_date))
    }
}
