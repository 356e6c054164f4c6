use std::ops::Range;

/// Splits `0..len` into `worker_count` contiguous, non-overlapping ranges whose
/// sizes differ by at most one.
///
/// The `len % worker_count` leftover rows go one each to the leading ranges.
/// When `worker_count > len` the trailing ranges are empty.
pub(crate) fn partition_ranges(len: usize, worker_count: usize) -> Vec<Range<usize>> {
    assert_ne!(worker_count, 0);
    let base = len / worker_count;
    let remainder = len % worker_count;
    let mut start = 0;
    (0..worker_count)
        .map(|worker| {
            let size = base + usize::from(worker < remainder);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}
