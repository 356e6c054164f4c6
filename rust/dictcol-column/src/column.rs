use dictcol_common::{Result, error::Error};

use crate::{
    builder::{BuildOptions, ColumnBuilder},
    dictionary::Dictionary,
};

/// A dictionary-encoded string column.
///
/// Holds the global [`Dictionary`] and one identifier per input row, in original row
/// order. For every row `i`, `dictionary.value_of(encoded_ids[i])` is the original
/// string at row `i`.
///
/// The column is frozen once built: no method takes `&mut self`, and queries only
/// borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedColumn {
    dictionary: Dictionary,
    encoded_ids: Vec<u32>,
}

impl EncodedColumn {
    /// Encodes `rows` using `worker_count` parallel workers.
    ///
    /// Global ids are reproducible for a given input and worker count.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidConfig` if `worker_count < 1`.
    pub fn build<S>(rows: &[S], worker_count: usize) -> Result<EncodedColumn>
    where
        S: AsRef<str> + Sync,
    {
        ColumnBuilder::new(BuildOptions::with_worker_count(worker_count)).build(rows)
    }

    /// Assembles a column from its parts, verifying that every id is defined by the
    /// dictionary.
    pub fn from_parts(dictionary: Dictionary, encoded_ids: Vec<u32>) -> Result<EncodedColumn> {
        let len = dictionary.len();
        if let Some((row, id)) = encoded_ids
            .iter()
            .enumerate()
            .find(|(_, id)| **id as usize >= len)
        {
            return Err(Error::invalid_format(
                "encoded data",
                format!("row {row} refers to id {id}, dictionary has {len} values"),
            ));
        }
        Ok(EncodedColumn::from_trusted_parts(dictionary, encoded_ids))
    }

    pub(crate) fn from_trusted_parts(dictionary: Dictionary, encoded_ids: Vec<u32>) -> EncodedColumn {
        debug_assert!(encoded_ids.iter().all(|&id| (id as usize) < dictionary.len()));
        EncodedColumn {
            dictionary,
            encoded_ids,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.encoded_ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.encoded_ids.is_empty()
    }

    /// Number of distinct values.
    #[inline]
    pub fn distinct_count(&self) -> usize {
        self.dictionary.len()
    }

    #[inline]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// One global id per row, in row order.
    #[inline]
    pub fn encoded_ids(&self) -> &[u32] {
        &self.encoded_ids
    }

    /// Returns the original value of `row`.
    pub fn value_at(&self, row: usize) -> Option<&str> {
        self.encoded_ids
            .get(row)
            .and_then(|&id| self.dictionary.value_of(id))
    }

    /// Reconstructs the original rows.
    pub fn decode(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        let values = self.dictionary.values();
        self.encoded_ids.iter().map(move |&id| values[id as usize].as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let rows = ["apple", "banana", "apple", "cherry", "applause"];
        let column = EncodedColumn::build(&rows, 2).unwrap();
        assert_eq!(column.len(), 5);
        assert_eq!(column.distinct_count(), 4);
        assert_eq!(column.encoded_ids(), &[0, 1, 0, 2, 3]);
        assert_eq!(column.value_at(3), Some("cherry"));
        assert_eq!(column.value_at(5), None);
        assert_eq!(column.decode().collect::<Vec<_>>(), rows);
    }

    #[test]
    fn test_from_parts_validates_ids() {
        let dictionary = Dictionary::from_values(["a", "b"]).unwrap();
        let column = EncodedColumn::from_parts(dictionary.clone(), vec![1, 0, 1]).unwrap();
        assert_eq!(column.decode().collect::<Vec<_>>(), vec!["b", "a", "b"]);

        let err = EncodedColumn::from_parts(dictionary, vec![0, 2]).unwrap_err();
        assert!(err.is_io());
    }
}
