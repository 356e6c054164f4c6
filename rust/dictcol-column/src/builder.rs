use std::time::Instant;

use dictcol_common::{Result, error::Error, verify_config};
use rayon::prelude::*;

use crate::{
    column::EncodedColumn,
    encoder::{LocalEncoding, encode_range},
    merge::{DictionaryMerger, MergedDictionary},
    partition::partition_ranges,
};

/// Parameters of a column build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Number of contiguous row ranges encoded independently. Must be at least 1.
    pub worker_count: usize,
}

impl BuildOptions {
    pub fn with_worker_count(worker_count: usize) -> BuildOptions {
        BuildOptions { worker_count }
    }
}

impl Default for BuildOptions {
    /// One worker per available CPU.
    fn default() -> Self {
        let worker_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        BuildOptions { worker_count }
    }
}

/// Builds [`EncodedColumn`]s from string rows.
///
/// ## Phases
///
/// 1. **Partition**: the rows are split into `worker_count` contiguous ranges whose
///    sizes differ by at most one.
/// 2. **Local encoding** (parallel, rayon): each worker encodes its range against a
///    private dictionary. As soon as a worker finishes, its first-seen value list is
///    sent to the merge task.
/// 3. **Merge** (dedicated thread): the merge task folds the local dictionaries into
///    the global dictionary in ascending worker order, concurrently with the
///    remaining workers. It is joined before anything else proceeds.
/// 4. **Remap** (parallel, rayon): every range rewrites its local codes into its
///    disjoint slice of the final id array.
///
/// Either every phase succeeds and a complete column is returned, or the build fails
/// as a whole.
#[derive(Debug, Clone, Default)]
pub struct ColumnBuilder {
    options: BuildOptions,
}

impl ColumnBuilder {
    pub fn new(options: BuildOptions) -> ColumnBuilder {
        ColumnBuilder { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Encodes `rows` into a new column.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `worker_count < 1`; nothing is started in that case.
    /// - `WorkerFailed` if the merge task cannot be started or does not complete.
    pub fn build<S>(&self, rows: &[S]) -> Result<EncodedColumn>
    where
        S: AsRef<str> + Sync,
    {
        let worker_count = self.options.worker_count;
        verify_config!(worker_count, worker_count >= 1);

        let started = Instant::now();
        let (locals, merged) = encode_and_merge(rows, worker_count)?;
        log::debug!(
            "encoded {} rows with {} workers into {} distinct values in {:?}",
            rows.len(),
            worker_count,
            merged.dictionary.len(),
            started.elapsed()
        );

        let remapped = Instant::now();
        let MergedDictionary { dictionary, remaps } = merged;
        let encoded_ids = remap(rows.len(), &locals, &remaps);
        log::debug!("remapped {} rows in {:?}", rows.len(), remapped.elapsed());

        Ok(EncodedColumn::from_trusted_parts(dictionary, encoded_ids))
    }
}

/// Runs the local encoders on the rayon pool and the merge task on its own scoped
/// thread, connected by a channel. Returns once both sides are done.
fn encode_and_merge<S>(
    rows: &[S],
    worker_count: usize,
) -> Result<(Vec<LocalEncoding>, MergedDictionary)>
where
    S: AsRef<str> + Sync,
{
    let ranges = partition_ranges(rows.len(), worker_count);
    let (sender, receiver) = crossbeam_channel::unbounded();

    std::thread::scope(|scope| -> Result<_> {
        let merge_task = std::thread::Builder::new()
            .name("dictcol-merge".to_string())
            .spawn_scoped(scope, move || DictionaryMerger::new(worker_count).run(receiver))
            .map_err(|e| Error::worker_failed(format!("failed to start the merge task: {e}")))?;

        let locals = ranges
            .into_par_iter()
            .enumerate()
            .map_with(sender, |sender, (worker, range)| {
                let (dictionary, encoding) = encode_range(rows, worker, range);
                // A closed channel means the merge task has already failed; that
                // failure is reported when it is joined.
                let _ = sender.send(dictionary);
                encoding
            })
            .collect::<Vec<_>>();

        let merged = merge_task
            .join()
            .map_err(|_| Error::worker_failed("the merge task panicked"))??;
        Ok((locals, merged))
    })
}

/// Rewrites local codes to global ids, each range into its own slice of the output.
fn remap(len: usize, locals: &[LocalEncoding], remaps: &[Vec<u32>]) -> Vec<u32> {
    let mut encoded_ids = vec![0u32; len];
    {
        let mut targets = Vec::with_capacity(locals.len());
        let mut rest = encoded_ids.as_mut_slice();
        for local in locals {
            debug_assert_eq!(local.range.start, len - rest.len());
            let (head, tail) = rest.split_at_mut(local.range.len());
            targets.push(head);
            rest = tail;
        }
        debug_assert!(rest.is_empty());

        targets
            .into_par_iter()
            .zip(locals.par_iter())
            .for_each(|(target, local)| {
                let table = &remaps[local.worker];
                for (slot, &code) in target.iter_mut().zip(&local.codes) {
                    *slot = table[code as usize];
                }
            });
    }
    encoded_ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictcol_common::ErrorKind;

    #[test]
    fn test_zero_workers_is_rejected() {
        let err = ColumnBuilder::new(BuildOptions::with_worker_count(0))
            .build(&["a", "b"])
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidConfig { .. }));
    }

    #[test]
    fn test_default_options_use_available_parallelism() {
        let options = BuildOptions::default();
        assert!(options.worker_count >= 1);
        let column = ColumnBuilder::default().build(&["x", "y", "x"]).unwrap();
        assert_eq!(column.encoded_ids(), &[0, 1, 0]);
    }

    #[test]
    fn test_remap_writes_each_range_in_place() {
        let rows = ["a", "b", "a", "c", "b", "d", "a"];
        let (locals, merged) = encode_and_merge(&rows, 3).unwrap();
        assert_eq!(locals.len(), 3);
        assert_eq!(
            locals.iter().map(|l| l.range.clone()).collect::<Vec<_>>(),
            vec![0..3, 3..5, 5..7]
        );

        let ids = remap(rows.len(), &locals, &merged.remaps);
        let decoded = ids
            .iter()
            .map(|&id| merged.dictionary.value_of(id).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(decoded, rows);
    }

    #[test]
    fn test_more_workers_than_rows() {
        let rows = ["only", "two"];
        let column = ColumnBuilder::new(BuildOptions::with_worker_count(16))
            .build(&rows)
            .unwrap();
        assert_eq!(column.decode().collect::<Vec<_>>(), rows);
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<String> = Vec::new();
        let column = ColumnBuilder::new(BuildOptions::with_worker_count(4))
            .build(&rows)
            .unwrap();
        assert!(column.is_empty());
        assert!(column.dictionary().is_empty());
    }

    #[test]
    fn test_build_inside_rayon_pool() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap();
        let rows = dictcol_testkit::data_gen::generate_rows(1000, 20, 3);
        let column = pool.install(|| {
            ColumnBuilder::new(BuildOptions::with_worker_count(8))
                .build(&rows)
                .unwrap()
        });
        assert!(column.decode().eq(rows.iter().map(|r| r.as_str())));
    }
}
