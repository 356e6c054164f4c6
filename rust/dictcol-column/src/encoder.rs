use std::{ops::Range, sync::Arc};

use crate::dictionary::Dictionary;

/// The first-seen values of one worker's range, in local id order.
///
/// This is what a worker hands over to the merge task.
#[derive(Debug)]
pub(crate) struct LocalDictionary {
    pub worker: usize,
    pub values: Vec<Arc<str>>,
}

/// Locally-coded rows of one worker's range.
#[derive(Debug)]
pub(crate) struct LocalEncoding {
    pub worker: usize,
    pub range: Range<usize>,
    /// One local id per row of `range`, in row order.
    pub codes: Vec<u32>,
}

/// Encodes `rows[range]` against a fresh local dictionary.
///
/// Touches no shared state: local ids are assigned in first-seen order within the
/// range only.
pub(crate) fn encode_range<S: AsRef<str>>(
    rows: &[S],
    worker: usize,
    range: Range<usize>,
) -> (LocalDictionary, LocalEncoding) {
    let mut dictionary = Dictionary::new();
    let codes = rows[range.clone()]
        .iter()
        .map(|row| dictionary.get_or_insert(row.as_ref()))
        .collect::<Vec<_>>();

    (
        LocalDictionary {
            worker,
            values: dictionary.into_values(),
        },
        LocalEncoding {
            worker,
            range,
            codes,
        },
    )
}
