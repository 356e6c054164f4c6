//! Bench command implementation

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use dictcol_column::{
    BuildOptions, ColumnBuilder, ScanStrategy,
    baseline::{scan_rows_exact, scan_rows_prefix},
};
use serde::Serialize;

use crate::utils;

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub rows: usize,
    pub distinct_values: usize,
    pub workers: usize,
    pub iterations: u32,
    pub encode_ms: f64,
    pub exact: LookupTimings,
    pub prefix: LookupTimings,
}

/// Average time of one lookup, per method.
#[derive(Debug, Serialize)]
pub struct LookupTimings {
    pub query: String,
    pub matched_rows: usize,
    pub vectorized_kernel: String,
    pub vectorized_ms: f64,
    pub scalar_ms: f64,
    pub row_scan_ms: f64,
}

/// Run the bench command
pub fn run(
    file: String,
    workers: Option<usize>,
    term: Option<String>,
    prefix: Option<String>,
    iterations: u32,
) -> Result<()> {
    let report = bench_file(&file, workers, term, prefix, iterations)?;
    utils::print_json(&report)
}

pub fn bench_file(
    file: &str,
    workers: Option<usize>,
    term: Option<String>,
    prefix: Option<String>,
    iterations: u32,
) -> Result<BenchReport> {
    anyhow::ensure!(iterations >= 1, "Iteration count must be at least 1");
    let rows = utils::read_rows(file)?;
    let term = match term {
        Some(term) => term,
        None => default_term(&rows)?,
    };
    let prefix = match prefix {
        Some(prefix) => prefix,
        None => default_prefix(&rows)?,
    };

    let options = workers
        .map(BuildOptions::with_worker_count)
        .unwrap_or_default();
    let workers = options.worker_count;
    let start_time = Instant::now();
    let column = ColumnBuilder::new(options)
        .build(&rows)
        .with_context(|| format!("Failed to encode column file: {file}"))?;
    let encode_ms = utils::millis(start_time.elapsed());

    let (vectorized, vectorized_time) = timed(iterations, || {
        column.exact_query_with(&term, ScanStrategy::Vectorized)
    });
    let (scalar, scalar_time) = timed(iterations, || {
        column.exact_query_with(&term, ScanStrategy::Scalar)
    });
    let (baseline, baseline_time) = timed(iterations, || scan_rows_exact(&rows, &term));
    anyhow::ensure!(
        vectorized == scalar && scalar == baseline,
        "Exact lookups of {term:?} disagree: vectorized {}, scalar {}, row scan {} rows",
        vectorized.len(),
        scalar.len(),
        baseline.len()
    );
    let exact = LookupTimings {
        query: term,
        matched_rows: baseline.len(),
        vectorized_kernel: ScanStrategy::Vectorized.kernel().to_string(),
        vectorized_ms: per_iteration_ms(vectorized_time, iterations),
        scalar_ms: per_iteration_ms(scalar_time, iterations),
        row_scan_ms: per_iteration_ms(baseline_time, iterations),
    };

    let (vectorized, vectorized_time) = timed(iterations, || {
        column.prefix_query_with(&prefix, ScanStrategy::Vectorized)
    });
    let (scalar, scalar_time) = timed(iterations, || {
        column.prefix_query_with(&prefix, ScanStrategy::Scalar)
    });
    let (baseline, baseline_time) = timed(iterations, || scan_rows_prefix(&rows, &prefix));
    let (vectorized, scalar, baseline) = (vectorized?, scalar?, baseline?);
    // The encoded column orders matches by global id, the row scan by first
    // occurrence; ids are assigned in first-occurrence order so both agree.
    anyhow::ensure!(
        vectorized == scalar && scalar == baseline,
        "Prefix lookups of {prefix:?} disagree: vectorized {}, scalar {}, row scan {} values",
        vectorized.len(),
        scalar.len(),
        baseline.len()
    );
    let prefix = LookupTimings {
        query: prefix,
        matched_rows: baseline.iter().map(|m| m.rows.len()).sum(),
        vectorized_kernel: ScanStrategy::Vectorized.kernel().to_string(),
        vectorized_ms: per_iteration_ms(vectorized_time, iterations),
        scalar_ms: per_iteration_ms(scalar_time, iterations),
        row_scan_ms: per_iteration_ms(baseline_time, iterations),
    };

    Ok(BenchReport {
        rows: column.len(),
        distinct_values: column.distinct_count(),
        workers,
        iterations,
        encode_ms,
        exact,
        prefix,
    })
}

/// Runs `f` `iterations` times, returning the last result and the total time.
fn timed<T>(iterations: u32, mut f: impl FnMut() -> T) -> (T, Duration) {
    let start_time = Instant::now();
    let mut result = f();
    for _ in 1..iterations {
        result = std::hint::black_box(f());
    }
    (result, start_time.elapsed())
}

fn per_iteration_ms(total: Duration, iterations: u32) -> f64 {
    utils::millis(total) / f64::from(iterations)
}

fn default_term(rows: &[String]) -> Result<String> {
    rows.first()
        .cloned()
        .context("Column file is empty, pass --term explicitly")
}

fn default_prefix(rows: &[String]) -> Result<String> {
    rows.iter()
        .find_map(|row| row.chars().next())
        .map(String::from)
        .context("Column file has no non-empty row, pass --prefix explicitly")
}
