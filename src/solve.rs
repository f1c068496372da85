//! One complete run: generate, search, time, report.

use std::path::PathBuf;
use std::time::Instant;

use crate::clock::cpu_time;
use crate::error::JobError;
use crate::generator::generate;
use crate::problem::{GenerationConfig, Problem};
use crate::report::ReportFile;
use crate::rng::Rng30;
use crate::search::{
    RandomLimits, SearchResult, Strategy, search_enumerate, search_exhaustive, search_greedy,
    search_random,
};

/// Everything a run needs, as parsed from the command line.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub config: GenerationConfig,
    pub strategy: Strategy,
    pub random: RandomLimits,
    pub histogram: bool,
    pub output_dir: PathBuf,
}

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub result: SearchResult,
    pub solution_seconds: f64,
    pub report: PathBuf,
}

/// Run the selected strategy on the configured instance and write its report.
pub fn run(options: &RunOptions) -> Result<RunSummary, JobError> {
    let mut problem = generate(&options.config);
    // Open first so an existing result fails the run before the search.
    let report = ReportFile::create(&options.output_dir, &options.config)?;
    tracing::debug!(path = %report.path().display(), "report file created");

    tracing::info!(
        strategy = %options.strategy,
        seed = options.config.seed,
        tasks = options.config.task_count,
        workers = options.config.worker_count,
        "search start"
    );
    let (result, solution_seconds) = timed(|| search(&mut problem, options));
    problem.sort_for_display();
    tracing::info!(
        best = result.best_total_profit,
        valid = result.valid_assignments,
        seconds = solution_seconds,
        "search done"
    );

    let report = report.write(&problem, &result, solution_seconds)?;
    Ok(RunSummary {
        result,
        solution_seconds,
        report,
    })
}

fn search(problem: &mut Problem, options: &RunOptions) -> SearchResult {
    match options.strategy {
        Strategy::Exhaustive => search_exhaustive(problem, options.histogram),
        Strategy::Greedy => search_greedy(problem),
        Strategy::Random => {
            let mut rng = Rng30::seeded(u64::from(options.config.seed));
            search_random(problem, &mut rng, options.random, options.histogram)
        }
        Strategy::Enumerate => search_enumerate(problem, options.histogram),
    }
}

/// Run `f` and measure it in CPU seconds, or wall seconds where CPU time is
/// unavailable.
fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let cpu_start = cpu_time();
    let wall_start = Instant::now();
    let value = f();
    let seconds = match (cpu_start, cpu_time()) {
        (Some(start), Some(end)) => end - start,
        _ => wall_start.elapsed().as_secs_f64(),
    };
    (value, seconds)
}

/// Print the `key=value` summary on stdout.
pub fn print_summary(summary: &RunSummary) {
    println!("SOLVE SUMMARY");
    println!("strategy={}", summary.result.strategy);
    println!("best_profit={}", summary.result.best_total_profit);
    println!("valid_assignments={}", summary.result.valid_assignments);
    println!("solution_time_s={:.6}", summary.solution_seconds);
    println!("report={}", summary.report.display());
}
