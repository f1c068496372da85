//! CLI integration tests for report generation.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_job_selection");
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run job_selection binary")
}

fn summary_value<'a>(stdout: &'a str, key: &str) -> &'a str {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
        .unwrap_or_else(|| panic!("{key} line missing"))
}

#[test]
fn default_run_writes_report_in_seed_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_in(dir.path(), &[]);
    assert!(
        output.status.success(),
        "run exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SOLVE SUMMARY"), "summary missing from output");
    assert_eq!(summary_value(&stdout, "strategy"), "exhaustive");

    let report = fs::read_to_string(dir.path().join("002020").join("05_02_0.txt"))
        .expect("report file missing");
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[..4], ["NMec = 2020", "T = 5", "P = 2", "Profits not ignored"]);
    assert!(lines[4].starts_with("Valid tasks: "));
    assert!(lines[5].starts_with("Solution time = "));
    assert_eq!(lines[6], "Task data");
    // Five task lines, then the best profit and the end marker.
    assert!(lines[12].starts_with("Best profit: "));
    assert_eq!(lines[13], "End");
    assert_eq!(
        lines[12],
        format!("Best profit: {}", summary_value(&stdout, "best_profit"))
    );
}

#[test]
fn second_run_refuses_to_overwrite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = run_in(dir.path(), &["1", "3", "1", "1"]);
    assert!(first.status.success());
    let report_path = dir.path().join("000001").join("03_01_1.txt");
    let before = fs::read_to_string(&report_path).expect("report file missing");
    assert!(before.contains("Profits ignored\n"));

    let second = run_in(dir.path(), &["1", "3", "1", "1"]);
    assert_eq!(second.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("03_01_1.txt"), "stderr was: {stderr}");
    assert_eq!(fs::read_to_string(&report_path).expect("report"), before);
}

#[test]
fn out_of_range_parameters_fail_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_in(dir.path(), &["2020", "65"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bad T (1 <= T (65) <= 64)"), "stderr was: {stderr}");
    assert!(!dir.path().join("002020").exists());
}

#[test]
fn strategies_agree_on_small_unit_profit_instance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let best = |strategy: &str, out: &str| {
        let output = run_in(
            dir.path(),
            &["95584", "8", "2", "1", "--strategy", strategy, "--output-dir", out],
        );
        assert!(output.status.success(), "{strategy} failed");
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        summary_value(&stdout, "best_profit")
            .parse::<i64>()
            .expect("numeric best_profit")
    };
    let exhaustive = best("exhaustive", "a");
    let enumerate = best("enumerate", "b");
    let greedy = best("greedy", "c");
    assert_eq!(exhaustive, enumerate);
    assert!(greedy <= exhaustive);
}

#[test]
fn histogram_flag_adds_profit_counts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_in(dir.path(), &["7", "4", "1", "0", "--histogram"]);
    assert!(output.status.success());
    let report = fs::read_to_string(dir.path().join("000007").join("04_01_0.txt"))
        .expect("report file missing");
    assert!(report.contains("\nAll profits:\n0 1\n"));
    assert!(report.ends_with("End\n"));
}

#[test]
fn random_strategy_honours_sample_count() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_in(
        dir.path(),
        &["2020", "10", "3", "0", "--strategy", "random", "--samples", "500"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(summary_value(&stdout, "valid_assignments"), "500");
}

#[test]
fn non_numeric_seed_reads_as_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_in(dir.path(), &["abc"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Bad NMec (1 <= NMec (0) <= 999999)"),
        "stderr was: {stderr}"
    );
}

#[test]
fn infinite_time_limit_is_a_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_in(dir.path(), &["--strategy", "random", "--time-limit", "inf"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("002020").exists());
}
