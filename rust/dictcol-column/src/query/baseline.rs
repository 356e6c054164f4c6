//! Lookups over raw rows, without a dictionary.
//!
//! These are the plain linear scans an encoded column is measured against and the
//! reference its queries are checked against.

use ahash::AHashMap;
use dictcol_common::{Result, error::Error};

use crate::query::PrefixMatch;

/// Returns the ascending indices of the rows equal to `term`.
pub fn scan_rows_exact<S: AsRef<str>>(rows: &[S], term: &str) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.as_ref() == term)
        .map(|(i, _)| i)
        .collect()
}

/// Returns every distinct row value starting with `prefix`, with its ascending row
/// indices, ordered by first occurrence.
///
/// # Errors
///
/// Fails with `InvalidQuery` if `prefix` is empty.
pub fn scan_rows_prefix<S: AsRef<str>>(rows: &[S], prefix: &str) -> Result<Vec<PrefixMatch>> {
    if prefix.is_empty() {
        return Err(Error::invalid_query("prefix must not be empty"));
    }
    let mut slots = AHashMap::<&str, usize>::new();
    let mut matches = Vec::<PrefixMatch>::new();
    for (i, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if !row.as_bytes().starts_with(prefix.as_bytes()) {
            continue;
        }
        let slot = *slots.entry(row).or_insert_with(|| {
            matches.push(PrefixMatch::new(row, Vec::new()));
            matches.len() - 1
        });
        matches[slot].rows.push(i);
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_rows() {
        let rows = ["apple", "banana", "apple", "cherry", "applause"];
        assert_eq!(scan_rows_exact(&rows, "apple"), vec![0, 2]);
        assert!(scan_rows_exact(&rows, "grape").is_empty());

        assert_eq!(
            scan_rows_prefix(&rows, "app").unwrap(),
            vec![
                PrefixMatch::new("apple", vec![0, 2]),
                PrefixMatch::new("applause", vec![4]),
            ]
        );
        assert!(scan_rows_prefix(&rows, "").unwrap_err().is_invalid_query());
    }
}
