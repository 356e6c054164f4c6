use dictcol_lanes::{CompareKernel, ids};

use crate::{column::EncodedColumn, query::ScanStrategy};

impl EncodedColumn {
    /// Returns the ascending row indices holding `term`.
    ///
    /// An absent term yields an empty result, not an error.
    pub fn exact_query(&self, term: &str) -> Vec<usize> {
        self.exact_query_with(term, ScanStrategy::Auto)
    }

    /// Same as [`EncodedColumn::exact_query`] with an explicit scan strategy.
    pub fn exact_query_with(&self, term: &str, strategy: ScanStrategy) -> Vec<usize> {
        match self.dictionary().id_of(term) {
            Some(id) => self.rows_with_id(id, strategy.kernel()),
            None => Vec::new(),
        }
    }

    /// Scans the id array for `id` using `kernel`.
    pub(crate) fn rows_with_id(&self, id: u32, kernel: CompareKernel) -> Vec<usize> {
        ids::eq_positions(kernel, self.encoded_ids(), id)
    }
}
