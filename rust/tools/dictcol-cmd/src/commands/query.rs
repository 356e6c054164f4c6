//! Exact and prefix query commands

use std::time::Instant;

use anyhow::{Context, Result};
use dictcol_column::{PrefixMatch, ScanStrategy};
use serde::Serialize;

use crate::utils;

#[derive(Debug, Serialize)]
pub struct ExactReport {
    pub term: String,
    pub kernel: String,
    pub elapsed_ms: f64,
    pub count: usize,
    pub rows: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct PrefixReport {
    pub prefix: String,
    pub kernel: String,
    pub elapsed_ms: f64,
    pub value_count: usize,
    pub row_count: usize,
    pub matches: Vec<PrefixMatch>,
}

/// Run the exact command
pub fn run_exact(dump_path: String, term: String, strategy: ScanStrategy) -> Result<()> {
    let report = query_exact(&dump_path, &term, strategy)?;
    utils::print_json(&report)
}

/// Run the prefix command
pub fn run_prefix(dump_path: String, prefix: String, strategy: ScanStrategy) -> Result<()> {
    let report = query_prefix(&dump_path, &prefix, strategy)?;
    utils::print_json(&report)
}

pub fn query_exact(dump_path: &str, term: &str, strategy: ScanStrategy) -> Result<ExactReport> {
    let column = utils::read_dump(dump_path)?;

    let start_time = Instant::now();
    let rows = column.exact_query_with(term, strategy);
    let elapsed_ms = utils::millis(start_time.elapsed());

    Ok(ExactReport {
        term: term.to_string(),
        kernel: strategy.kernel().to_string(),
        elapsed_ms,
        count: rows.len(),
        rows,
    })
}

pub fn query_prefix(dump_path: &str, prefix: &str, strategy: ScanStrategy) -> Result<PrefixReport> {
    let column = utils::read_dump(dump_path)?;

    let start_time = Instant::now();
    let matches = column
        .prefix_query_with(prefix, strategy)
        .with_context(|| format!("Invalid prefix query: {prefix:?}"))?;
    let elapsed_ms = utils::millis(start_time.elapsed());

    Ok(PrefixReport {
        prefix: prefix.to_string(),
        kernel: strategy.kernel().to_string(),
        elapsed_ms,
        value_count: matches.len(),
        row_count: matches.iter().map(|m| m.rows.len()).sum(),
        matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictcol_column::EncodedColumn;

    fn write_fruit_dump(dir: &tempfile::TempDir) -> String {
        let column =
            EncodedColumn::build(&["apple", "banana", "apple", "cherry", "applause"], 2).unwrap();
        let path = dir.path().join("fruit.txt");
        let path = path.to_str().unwrap().to_string();
        utils::write_dump(&column, &path).unwrap();
        path
    }

    #[test]
    fn test_exact() {
        let dir = tempfile::tempdir().unwrap();
        let dump = write_fruit_dump(&dir);
        for strategy in [ScanStrategy::Scalar, ScanStrategy::Vectorized] {
            let report = query_exact(&dump, "apple", strategy).unwrap();
            assert_eq!(report.rows, vec![0, 2]);
            assert_eq!(report.count, 2);
            assert_eq!(query_exact(&dump, "grape", strategy).unwrap().count, 0);
        }
    }

    #[test]
    fn test_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let dump = write_fruit_dump(&dir);
        let report = query_prefix(&dump, "app", ScanStrategy::Auto).unwrap();
        assert_eq!(report.value_count, 2);
        assert_eq!(report.row_count, 3);
        assert_eq!(
            report.matches,
            vec![
                PrefixMatch::new("apple", vec![0, 2]),
                PrefixMatch::new("applause", vec![4]),
            ]
        );
        assert!(query_prefix(&dump, "", ScanStrategy::Auto).is_err());
    }

    #[test]
    fn test_malformed_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        std::fs::write(&path, "Dictionary: 3\n0: a\n").unwrap();
        let err = query_exact(path.to_str().unwrap(), "a", ScanStrategy::Auto).unwrap_err();
        let cause = err.downcast_ref::<dictcol_column::Error>().unwrap();
        assert!(cause.is_io());
    }
}
