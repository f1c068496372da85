//! Per-worker availability used while placing tasks.

use crate::types::{IDLE, WorkerId};

/// Tracks until which date each worker is busy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerPool {
    busy_until: Vec<i32>,
}

impl WorkerPool {
    /// Create `count` idle workers.
    pub fn new(count: usize) -> Self {
        Self {
            busy_until: vec![IDLE; count],
        }
    }

    pub fn len(&self) -> usize {
        self.busy_until.len()
    }

    /// Whether `worker` is free before `starting_date`.
    pub fn is_eligible(&self, worker: WorkerId, starting_date: i32) -> bool {
        self.busy_until[worker] < starting_date
    }

    /// Lowest-indexed worker free before `starting_date` (first-fit).
    pub fn first_eligible(&self, starting_date: i32) -> Option<WorkerId> {
        self.busy_until
            .iter()
            .position(|&busy| busy < starting_date)
    }

    /// Mark `worker` busy through `ending_date`; returns the value to hand
    /// back to [`WorkerPool::release`].
    pub fn acquire(&mut self, worker: WorkerId, ending_date: i32) -> i32 {
        debug_assert!(worker < self.busy_until.len(), "worker index out of range");
        std::mem::replace(&mut self.busy_until[worker], ending_date)
    }

    /// Undo an [`WorkerPool::acquire`].
    pub fn release(&mut self, worker: WorkerId, previous: i32) {
        debug_assert!(
            previous <= self.busy_until[worker],
            "release would move busy_until forward: worker={worker}"
        );
        self.busy_until[worker] = previous;
    }

    pub fn reset(&mut self) {
        self.busy_until.fill(IDLE);
    }

    pub fn all_idle(&self) -> bool {
        self.busy_until.iter().all(|&busy| busy == IDLE)
    }
}
