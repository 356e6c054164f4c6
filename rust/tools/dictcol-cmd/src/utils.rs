//! Common utilities for dictcol-cmd

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
    path::Path,
    time::Duration,
};

use anyhow::{Context, Result};
use dictcol_column::EncodedColumn;
use serde::Serialize;

/// Checks if a file exists and is readable
pub fn validate_file_exists(path: &str) -> Result<()> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }
    if !file_path.is_file() {
        anyhow::bail!("Path is not a file: {}", path);
    }
    Ok(())
}

/// Reads a column file, one row per line. A trailing `\r` is stripped from every
/// line; a trailing newline at the end of the file does not produce an extra row.
pub fn read_rows(path: &str) -> Result<Vec<String>> {
    validate_file_exists(path)?;
    let file = File::open(path).with_context(|| format!("Failed to open column file: {path}"))?;
    BufReader::new(file)
        .lines()
        .map(|line| {
            line.map(|mut line| {
                if line.ends_with('\r') {
                    line.pop();
                }
                line
            })
            .with_context(|| format!("Failed to read column file: {path}"))
        })
        .collect()
}

/// Loads a column from a text dump written by `encode`.
pub fn read_dump(path: &str) -> Result<EncodedColumn> {
    validate_file_exists(path)?;
    let file = File::open(path).with_context(|| format!("Failed to open dump: {path}"))?;
    EncodedColumn::read_text(BufReader::new(file))
        .with_context(|| format!("Failed to load encoded column from: {path}"))
}

/// Writes the text dump of `column` to `path`, replacing any existing file.
pub fn write_dump(column: &EncodedColumn, path: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create dump: {path}"))?;
    column
        .write_text(BufWriter::new(file))
        .with_context(|| format!("Failed to write dump: {path}"))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
