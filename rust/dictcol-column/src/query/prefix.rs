use dictcol_common::{Result, error::Error};
use dictcol_lanes::{CompareKernel, bytes};

use crate::{
    column::EncodedColumn,
    query::{PrefixMatch, ScanStrategy},
};

/// Above this many matched values, rows are gathered in one pass over the id
/// array instead of one scan per value.
const PER_VALUE_SCAN_LIMIT: usize = 4;

impl EncodedColumn {
    /// Returns every distinct value whose leading bytes equal `prefix`, paired with
    /// its ascending row indices, ordered by ascending global id.
    ///
    /// Prefixes of any length are compared in full, one 32-byte register at a time.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidQuery` if `prefix` is empty.
    pub fn prefix_query(&self, prefix: &str) -> Result<Vec<PrefixMatch>> {
        self.prefix_query_with(prefix, ScanStrategy::Auto)
    }

    /// Same as [`EncodedColumn::prefix_query`] with an explicit scan strategy.
    pub fn prefix_query_with(
        &self,
        prefix: &str,
        strategy: ScanStrategy,
    ) -> Result<Vec<PrefixMatch>> {
        if prefix.is_empty() {
            return Err(Error::invalid_query("prefix must not be empty"));
        }
        let kernel = strategy.kernel();

        let matched = self
            .dictionary()
            .iter()
            .filter(|(_, value)| bytes::starts_with(kernel, value.as_bytes(), prefix.as_bytes()))
            .collect::<Vec<_>>();
        let ids = matched.iter().map(|&(id, _)| id).collect::<Vec<_>>();
        let rows = self.rows_with_ids(&ids, kernel);

        Ok(matched
            .into_iter()
            .zip(rows)
            .map(|((_, value), rows)| PrefixMatch::new(value, rows))
            .collect())
    }

    /// Returns, for each of `ids` (ascending, distinct), its ascending row indices.
    fn rows_with_ids(&self, ids: &[u32], kernel: CompareKernel) -> Vec<Vec<usize>> {
        if ids.len() <= PER_VALUE_SCAN_LIMIT {
            return ids.iter().map(|&id| self.rows_with_id(id, kernel)).collect();
        }

        const UNMATCHED: u32 = u32::MAX;
        let mut slots = vec![UNMATCHED; self.distinct_count()];
        for (slot, &id) in ids.iter().enumerate() {
            slots[id as usize] = slot as u32;
        }
        let mut rows = vec![Vec::new(); ids.len()];
        for (row, &id) in self.encoded_ids().iter().enumerate() {
            let slot = slots[id as usize];
            if slot != UNMATCHED {
                rows[slot as usize].push(row);
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use crate::{EncodedColumn, PrefixMatch, ScanStrategy};

    #[test]
    fn test_prefix_query() {
        let rows = ["apple", "banana", "apple", "cherry", "applause"];
        let column = EncodedColumn::build(&rows, 2).unwrap();

        for strategy in [ScanStrategy::Auto, ScanStrategy::Scalar, ScanStrategy::Vectorized] {
            assert_eq!(
                column.prefix_query_with("app", strategy).unwrap(),
                vec![
                    PrefixMatch::new("apple", vec![0, 2]),
                    PrefixMatch::new("applause", vec![4]),
                ]
            );
            assert_eq!(
                column.prefix_query_with("banana", strategy).unwrap(),
                vec![PrefixMatch::new("banana", vec![1])]
            );
            assert!(column.prefix_query_with("bananas", strategy).unwrap().is_empty());
            assert!(column.prefix_query_with("z", strategy).unwrap().is_empty());
            assert!(
                column
                    .prefix_query_with("", strategy)
                    .unwrap_err()
                    .is_invalid_query()
            );
        }
    }

    #[test]
    fn test_many_matches_use_single_pass() {
        let rows = (0..200)
            .map(|i| format!("key{}", i % 13))
            .collect::<Vec<_>>();
        let column = EncodedColumn::build(&rows, 4).unwrap();

        let matches = column.prefix_query("key1").unwrap();
        // key1, key10, key11, key12 in first-occurrence order.
        assert_eq!(
            matches.iter().map(|m| m.value.as_str()).collect::<Vec<_>>(),
            vec!["key1", "key10", "key11", "key12"]
        );

        let matches = column.prefix_query("key").unwrap();
        assert_eq!(matches.len(), 13);
        for m in &matches {
            assert_eq!(m.rows, column.exact_query(&m.value));
        }
        assert_eq!(matches.iter().map(|m| m.rows.len()).sum::<usize>(), 200);
    }

    #[test]
    fn test_multibyte_prefix() {
        let rows = ["héllo", "hélium", "hello", "h"];
        let column = EncodedColumn::build(&rows, 2).unwrap();
        let scalar = column.prefix_query_with("hé", ScanStrategy::Scalar).unwrap();
        let vectorized = column.prefix_query_with("hé", ScanStrategy::Vectorized).unwrap();
        assert_eq!(scalar, vectorized);
        assert_eq!(
            scalar,
            vec![
                PrefixMatch::new("héllo", vec![0]),
                PrefixMatch::new("hélium", vec![1]),
            ]
        );
    }
}
