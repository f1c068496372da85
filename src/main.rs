mod assignment;
mod clock;
mod error;
mod generator;
mod logging;
mod problem;
mod report;
mod rng;
mod search;
mod solve;
mod types;
mod workers;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::JobError;
use crate::problem::GenerationConfig;
use crate::search::{DEFAULT_RANDOM_SAMPLES, RandomLimits, Strategy};
use crate::solve::RunOptions;

/// Weighted job selection: assign dated, profitable tasks to a pool of
/// workers and report the most profitable selection found.
#[derive(Debug, Parser)]
#[command(name = "job_selection", version)]
struct Cli {
    // Positionals keep only their leading integer; junk reads as 0 and fails
    // the range check.
    /// Instance seed (student number), 1..=999999
    #[arg(default_value = "2020", allow_negative_numbers = true, value_parser = leading_integer)]
    seed: i64,

    /// Number of tasks T, 1..=64
    #[arg(default_value = "5", allow_negative_numbers = true, value_parser = leading_integer)]
    task_count: i64,

    /// Number of workers P, 1..=10
    #[arg(default_value = "2", allow_negative_numbers = true, value_parser = leading_integer)]
    worker_count: i64,

    /// Nonzero to treat every profit as 1
    #[arg(default_value = "0", allow_negative_numbers = true, value_parser = leading_integer)]
    ignore_profit: i64,

    /// Search strategy
    #[arg(long, value_enum, default_value_t = Strategy::Exhaustive)]
    strategy: Strategy,

    /// Valid samples the random strategy collects
    #[arg(long, default_value_t = DEFAULT_RANDOM_SAMPLES)]
    samples: u64,

    /// Stop the random strategy after this many seconds
    #[arg(long, value_name = "SECS", value_parser = parse_time_limit)]
    time_limit: Option<Duration>,

    /// Append the number of valid assignments per total profit to the report
    #[arg(long)]
    histogram: bool,

    /// Directory the seed directory is created in
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

impl Cli {
    fn into_options(self) -> Result<RunOptions, JobError> {
        let config = GenerationConfig::new(
            self.seed,
            self.task_count,
            self.worker_count,
            self.ignore_profit != 0,
        )?;
        Ok(RunOptions {
            config,
            strategy: self.strategy,
            random: RandomLimits {
                samples: self.samples,
                time_limit: self.time_limit,
            },
            histogram: self.histogram,
            output_dir: self.output_dir,
        })
    }
}

/// Optional sign and leading digits; anything else reads as 0 and values
/// beyond `i64` saturate.
fn leading_integer(arg: &str) -> Result<i64, String> {
    let trimmed = arg.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut value = 0i64;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }
    Ok(if negative { -value } else { value })
}

/// Seconds as a finite, non-negative number.
fn parse_time_limit(arg: &str) -> Result<Duration, String> {
    let secs: f64 = arg
        .parse()
        .map_err(|_| format!("`{arg}` is not a number of seconds"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("`{arg}` must be a finite, non-negative number of seconds"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("`{arg}`: {e}"))
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let result = cli.into_options().and_then(|options| solve::run(&options));
    match result {
        Ok(summary) => solve::print_summary(&summary),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
