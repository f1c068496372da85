//! Problem instance: validated parameters, task list and worker state.

use crate::error::JobError;
use crate::types::{MAX_P, MAX_T, Task};
use crate::workers::WorkerPool;

const MAX_SEED: i64 = 999_999;

/// Validated generation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    pub seed: u32,
    pub task_count: usize,
    pub worker_count: usize,
    pub ignore_profit: bool,
}

impl GenerationConfig {
    /// Check every parameter against its bounds.
    pub fn new(
        seed: i64,
        task_count: i64,
        worker_count: i64,
        ignore_profit: bool,
    ) -> Result<Self, JobError> {
        check_range("NMec", seed, MAX_SEED)?;
        check_range("T", task_count, MAX_T as i64)?;
        check_range("P", worker_count, MAX_P as i64)?;
        Ok(Self {
            seed: seed as u32,
            task_count: task_count as usize,
            worker_count: worker_count as usize,
            ignore_profit,
        })
    }

    /// `1` when profits are ignored, `0` otherwise (as written in file names).
    pub fn ignore_flag(&self) -> u8 {
        u8::from(self.ignore_profit)
    }
}

fn check_range(name: &'static str, value: i64, max: i64) -> Result<(), JobError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(JobError::InvalidParameter { name, value, max })
    }
}

/// Tasks plus the mutable worker state a search works on.
#[derive(Clone, Debug)]
pub struct Problem {
    config: GenerationConfig,
    pub tasks: Vec<Task>,
    pub workers: WorkerPool,
}

impl Problem {
    /// Build a problem from explicit tasks; profits collapse to 1 when the
    /// config ignores them.
    pub fn new(config: GenerationConfig, mut tasks: Vec<Task>) -> Self {
        debug_assert_eq!(tasks.len(), config.task_count, "task count mismatch");
        if config.ignore_profit {
            for task in &mut tasks {
                task.profit = 1;
            }
        }
        Self {
            config,
            tasks,
            workers: WorkerPool::new(config.worker_count),
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Put tasks in the order every search strategy walks them.
    pub fn sort_for_search(&mut self) {
        self.tasks.sort_by(Task::by_end);
    }

    /// Put tasks back in display order, starting date first.
    pub fn sort_for_display(&mut self) {
        self.tasks.sort_by(Task::by_start);
    }

    /// Forget the branch being explored: no task assigned, all workers idle.
    pub fn reset_working_state(&mut self) {
        for task in &mut self.tasks {
            task.assigned_worker = None;
        }
        self.workers.reset();
    }

    pub fn clear_best(&mut self) {
        for task in &mut self.tasks {
            task.best_assigned_worker = None;
        }
    }

    /// True when no task is assigned and every worker is idle.
    pub fn is_idle(&self) -> bool {
        self.workers.all_idle() && self.tasks.iter().all(|t| t.assigned_worker.is_none())
    }

    /// Sum of profits over the best assignment snapshot.
    pub fn best_profit(&self) -> i64 {
        self.tasks
            .iter()
            .filter(|t| t.best_assigned_worker.is_some())
            .map(|t| i64::from(t.profit))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_inclusive() {
        assert!(GenerationConfig::new(1, 1, 1, false).is_ok());
        assert!(GenerationConfig::new(999_999, 64, 10, true).is_ok());
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        let cases = [
            (0, 5, 2, "NMec"),
            (1_000_000, 5, 2, "NMec"),
            (2020, 0, 2, "T"),
            (2020, 65, 2, "T"),
            (2020, 5, 0, "P"),
            (2020, 5, 11, "P"),
        ];
        for (seed, t, p, expected) in cases {
            match GenerationConfig::new(seed, t, p, false) {
                Err(JobError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn ignoring_profit_forces_unit_profits() {
        let config = GenerationConfig::new(1, 2, 1, true).expect("valid config");
        let problem = Problem::new(config, vec![Task::new(0, 3, 40), Task::new(5, 9, 70)]);
        assert!(problem.tasks.iter().all(|t| t.profit == 1));
        assert_eq!(config.ignore_flag(), 1);
    }

    #[test]
    fn reset_clears_assignments_and_workers() {
        let config = GenerationConfig::new(1, 1, 2, false).expect("valid config");
        let mut problem = Problem::new(config, vec![Task::new(0, 3, 40)]);
        problem.tasks[0].assigned_worker = Some(1);
        problem.workers.acquire(1, 3);
        assert!(!problem.is_idle());
        problem.reset_working_state();
        assert!(problem.is_idle());
    }
}
