//! Encode command implementation

use std::time::Instant;

use anyhow::{Context, Result};
use dictcol_column::{BuildOptions, ColumnBuilder};
use serde::Serialize;

use crate::utils;

#[derive(Debug, Serialize)]
pub struct EncodeSummary {
    pub rows: usize,
    pub distinct_values: usize,
    pub workers: usize,
    pub encode_ms: f64,
    pub output: String,
}

/// Run the encode command
pub fn run(file: String, output: String, workers: Option<usize>) -> Result<()> {
    let summary = encode_file(&file, &output, workers)?;
    utils::print_json(&summary)
}

pub fn encode_file(file: &str, output: &str, workers: Option<usize>) -> Result<EncodeSummary> {
    let rows = utils::read_rows(file)?;
    let options = workers
        .map(BuildOptions::with_worker_count)
        .unwrap_or_default();
    let workers = options.worker_count;

    let start_time = Instant::now();
    let column = ColumnBuilder::new(options)
        .build(&rows)
        .with_context(|| format!("Failed to encode column file: {file}"))?;
    let encode_ms = utils::millis(start_time.elapsed());

    utils::write_dump(&column, output)?;

    Ok(EncodeSummary {
        rows: column.len(),
        distinct_values: column.distinct_count(),
        workers,
        encode_ms,
        output: output.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_encode_file() {
        let mut source = tempfile::NamedTempFile::new().unwrap();
        writeln!(source, "apple\nbanana\napple\ncherry\napplause").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("dump.txt");
        let output = output.to_str().unwrap();

        let summary = encode_file(source.path().to_str().unwrap(), output, Some(2)).unwrap();
        assert_eq!(summary.rows, 5);
        assert_eq!(summary.distinct_values, 4);
        assert_eq!(summary.workers, 2);

        let dump = std::fs::read_to_string(output).unwrap();
        assert!(dump.starts_with("Dictionary: 4\n0: apple\n"));
        assert!(dump.ends_with("Encoded Data: 5\n0 1 0 2 3\n"));
    }

    #[test]
    fn test_zero_workers_fails() {
        let source = dictcol_testkit::files::write_column_file(&["a", "b"]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("dump.txt");
        let err = encode_file(
            source.path().to_str().unwrap(),
            output.to_str().unwrap(),
            Some(0),
        )
        .unwrap_err();
        let cause = err.downcast_ref::<dictcol_column::Error>().unwrap();
        assert!(cause.is_invalid_config());
        assert!(!output.exists());
    }
}
