//! Reproducible synthesis of job-selection instances.

use crate::problem::{GenerationConfig, Problem};
use crate::rng::{RandomSource, Rng30};
use crate::types::Task;

// Relative weight of each duration longer than 29 days.
const TAIL_WEIGHT: u64 = 100;
// Sum of the short-duration weights (2..=29) before scaling.
const SHORT_WEIGHT_SUM: f64 = 298.0;
// Profit factor draw: 0..=2500 rising triangle, 2501..=12500 falling triangle.
const PROFIT_DRAWS: u32 = 12_501;
const PROFIT_BEND: u32 = 2_500;

/// Seed of the instance stream. The worker count is left out so instances
/// with the same seed and task count only differ in P.
pub fn instance_seed(config: &GenerationConfig) -> u64 {
    u64::from(config.seed) + 314_161 * config.task_count as u64
}

/// Generate the instance described by `config`.
pub fn generate(config: &GenerationConfig) -> Problem {
    let mut rng = Rng30::seeded(instance_seed(config));
    generate_with(config, &mut rng)
}

/// Generate using an explicit random source.
pub fn generate_with<R: RandomSource>(config: &GenerationConfig, rng: &mut R) -> Problem {
    let total_span = total_span(config.task_count, config.worker_count);
    let cumulative = duration_cdf(total_span);
    let total_weight = cumulative[total_span];

    let mut tasks = Vec::with_capacity(config.task_count);
    for _ in 0..config.task_count {
        let r = 1 + u64::from(rng.next_u30()) % total_weight;
        let span = (0..total_span)
            .find(|&span| r <= cumulative[span])
            .unwrap_or(total_span);
        let starting_date = (rng.next_u30() as usize % (total_span - span + 1)) as i32;
        let ending_date = starting_date + span as i32 - 1;
        let profit = draw_profit(span, rng.next_u30());
        tasks.push(Task::new(starting_date, ending_date, profit));
    }
    tasks.sort_by(Task::by_start);

    let problem = Problem::new(*config, tasks);
    tracing::debug!(
        seed = config.seed,
        tasks = config.task_count,
        workers = config.worker_count,
        total_span,
        "generated problem"
    );
    problem
}

/// Latest possible ending date: ten days of work per task spread over the
/// workers, never less than 30.
fn total_span(task_count: usize, worker_count: usize) -> usize {
    (10 * task_count).div_ceil(worker_count).max(30)
}

/// Cumulative duration weights indexed by span (in days).
///
/// Spans 2..=10 rise, 11..=29 fall, and everything longer shares a flat tail
/// sized so long tasks make up about a tenth of the draws.
fn duration_cdf(total_span: usize) -> Vec<u64> {
    let long_spans = (total_span - 29) as f64;
    let scale = ((TAIL_WEIGHT as f64 * 10.0 * long_spans / SHORT_WEIGHT_SUM).ceil() as u64)
        .max(TAIL_WEIGHT);

    let mut weights = vec![0u64; total_span + 1];
    for (span, weight) in weights.iter_mut().enumerate().skip(2) {
        let span = span as u64;
        *weight = match span {
            2..=10 => scale * 2 * span,
            11..=29 => scale * (30 - span),
            _ => TAIL_WEIGHT,
        };
    }
    for span in 1..=total_span {
        weights[span] += weights[span - 1];
    }
    weights
}

/// Profit of a task lasting `span` days: `span` times a factor in 50..=300
/// drawn from a bent triangular density peaking at 100.
fn draw_profit(span: usize, draw: u32) -> i32 {
    let scale = draw % PROFIT_DRAWS;
    let factor = if scale <= PROFIT_BEND {
        50.0 + f64::from(scale).sqrt()
    } else {
        300.0 - 2.0 * f64::from(PROFIT_DRAWS - 1 - scale).sqrt()
    };
    1 + (span as f64 * factor).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(seed: i64, t: i64, p: i64, ignore: bool) -> GenerationConfig {
        GenerationConfig::new(seed, t, p, ignore).expect("valid config")
    }

    #[test]
    fn span_has_a_floor_of_thirty() {
        assert_eq!(total_span(1, 1), 30);
        assert_eq!(total_span(5, 2), 30);
        assert_eq!(total_span(64, 1), 640);
        assert_eq!(total_span(64, 3), 214);
    }

    #[test]
    fn cdf_excludes_spans_below_two() {
        let cdf = duration_cdf(30);
        assert_eq!(cdf[0], 0);
        assert_eq!(cdf[1], 0);
        assert!(cdf[2] > 0);
        assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
        // 298 * scale for the short spans plus one tail weight for span 30.
        assert_eq!(cdf[30], 298 * TAIL_WEIGHT + TAIL_WEIGHT);
    }

    #[test]
    fn long_tasks_make_up_about_a_tenth() {
        let cdf = duration_cdf(640);
        let total = cdf[640] as f64;
        let long = (cdf[640] - cdf[29]) as f64;
        let share = long / total;
        assert!(share > 0.05 && share <= 0.11, "long share was {share}");
    }

    #[test]
    fn profit_factor_covers_both_triangles() {
        assert_eq!(draw_profit(2, 0), 101);
        assert_eq!(draw_profit(2, 2500), 201);
        assert_eq!(draw_profit(2, 12_500), 601);
    }

    #[test]
    fn tasks_are_sorted_by_start_then_end() {
        let problem = generate(&config(2020, 40, 3, false));
        assert!(
            problem
                .tasks
                .windows(2)
                .all(|w| Task::by_start(&w[0], &w[1]).is_le())
        );
    }

    #[test]
    fn instance_seed_ignores_worker_count() {
        assert_eq!(
            instance_seed(&config(95584, 12, 1, false)),
            instance_seed(&config(95584, 12, 4, true))
        );
        assert_ne!(
            instance_seed(&config(95584, 12, 1, false)),
            instance_seed(&config(95584, 13, 1, false))
        );
    }

    #[test]
    fn generated_problem_starts_idle() {
        let problem = generate(&config(1, 10, 3, false));
        assert!(problem.is_idle());
        assert!(problem.tasks.iter().all(|t| t.best_assigned_worker.is_none()));
    }

    proptest! {
        #[test]
        fn tasks_respect_bounds(seed in 1i64..=999_999, t in 1i64..=64, p in 1i64..=10, ignore in any::<bool>()) {
            let problem = generate(&config(seed, t, p, ignore));
            let span = total_span(t as usize, p as usize) as i32;
            prop_assert_eq!(problem.tasks.len(), t as usize);
            for task in &problem.tasks {
                prop_assert!(0 <= task.starting_date);
                prop_assert!(task.starting_date <= task.ending_date);
                prop_assert!(task.ending_date < span);
                if ignore {
                    prop_assert_eq!(task.profit, 1);
                } else {
                    prop_assert!(task.profit >= 1);
                }
            }
        }

        #[test]
        fn generation_is_deterministic(seed in 1i64..=999_999, t in 1i64..=64, p in 1i64..=10) {
            let first = generate(&config(seed, t, p, false));
            let second = generate(&config(seed, t, p, false));
            prop_assert_eq!(first.tasks, second.tasks);
        }
    }
}
