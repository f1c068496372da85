//! Result file written after a search.

use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::JobError;
use crate::problem::{GenerationConfig, Problem};
use crate::search::SearchResult;

/// `root/{seed:06}/{T:02}_{P:02}_{I}.txt`
pub fn report_path(root: &Path, config: &GenerationConfig) -> PathBuf {
    root.join(format!("{:06}", config.seed)).join(format!(
        "{:02}_{:02}_{}.txt",
        config.task_count,
        config.worker_count,
        config.ignore_flag()
    ))
}

/// Render the report text.
pub fn render(problem: &Problem, result: &SearchResult, solution_seconds: f64) -> String {
    let config = problem.config();
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "NMec = {}", config.seed);
    let _ = writeln!(out, "T = {}", config.task_count);
    let _ = writeln!(out, "P = {}", config.worker_count);
    let _ = writeln!(
        out,
        "Profits{} ignored",
        if config.ignore_profit { "" } else { " not" }
    );
    let _ = writeln!(out, "Valid tasks: {}", result.valid_assignments);
    let _ = writeln!(out, "Solution time = {}", c_scientific(solution_seconds));
    let _ = writeln!(out, "Task data");
    for task in &problem.tasks {
        let worker = task.best_assigned_worker.map_or(-1, |w| w as i64);
        let _ = writeln!(
            out,
            "  {:3} {:3} {:5} {}",
            task.starting_date, task.ending_date, task.profit, worker
        );
    }
    let _ = writeln!(out, "Best profit: {}", result.best_total_profit);
    if let Some(histogram) = result.profit_histogram.as_ref() {
        let _ = writeln!(out, "All profits:");
        for (profit, count) in histogram {
            let _ = writeln!(out, "{profit} {count}");
        }
    }
    let _ = writeln!(out, "End");
    out
}

/// A freshly created report file, opened before the search runs so a
/// clash with an earlier result is reported up front.
pub struct ReportFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ReportFile {
    /// Create the report file for `config` under `root`. The seed directory
    /// may already exist; the file itself must not.
    pub fn create(root: &Path, config: &GenerationConfig) -> Result<Self, JobError> {
        let path = report_path(root, config);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| JobError::io(dir, e))?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| JobError::io(&path, e))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the report and close the file.
    pub fn write(
        self,
        problem: &Problem,
        result: &SearchResult,
        solution_seconds: f64,
    ) -> Result<PathBuf, JobError> {
        let Self { path, mut writer } = self;
        writer
            .write_all(render(problem, result, solution_seconds).as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| JobError::io(&path, e))?;
        writer
            .into_inner()
            .map_err(|e| JobError::io(&path, e.into_error()))?
            .sync_all()
            .map_err(|e| JobError::io(&path, e))?;
        tracing::info!(path = %path.display(), "report written");
        Ok(path)
    }
}

/// Format like C's `%.3e`: three decimals and an exponent with a sign and at
/// least two digits.
fn c_scientific(value: f64) -> String {
    let formatted = format!("{value:.3e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => {
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            Err(_) => formatted,
        },
        None => formatted,
    }
}
