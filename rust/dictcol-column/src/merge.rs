use std::{collections::BTreeMap, sync::Arc};

use crossbeam_channel::Receiver;
use dictcol_common::{Result, error::Error};

use crate::{dictionary::Dictionary, encoder::LocalDictionary};

/// Output of the merge stage.
#[derive(Debug)]
pub(crate) struct MergedDictionary {
    pub dictionary: Dictionary,
    /// `remaps[worker][local_id]` is the global id of that worker's local id.
    pub remaps: Vec<Vec<u32>>,
}

/// Folds worker-local dictionaries into one global dictionary.
///
/// Local dictionaries may arrive in any order; they are buffered and merged strictly
/// in ascending worker index, each walked in local first-seen order. A value absent
/// from the global dictionary receives the next unused global id. The resulting
/// assignment is deterministic for a given input and worker count.
///
/// The merger is owned by a single merge task, so the global dictionary has exactly
/// one writer and needs no lock.
pub(crate) struct DictionaryMerger {
    worker_count: usize,
    dictionary: Dictionary,
    /// Local dictionaries received ahead of their turn, keyed by worker index.
    pending: BTreeMap<usize, Vec<Arc<str>>>,
    remaps: Vec<Vec<u32>>,
}

impl DictionaryMerger {
    pub fn new(worker_count: usize) -> DictionaryMerger {
        DictionaryMerger {
            worker_count,
            dictionary: Dictionary::new(),
            pending: BTreeMap::new(),
            remaps: Vec::with_capacity(worker_count),
        }
    }

    /// Accepts the local dictionary of one worker and merges every dictionary that
    /// is now next in worker order.
    pub fn push(&mut self, local: LocalDictionary) -> Result<()> {
        if local.worker >= self.worker_count
            || local.worker < self.remaps.len()
            || self.pending.contains_key(&local.worker)
        {
            return Err(Error::worker_failed(format!(
                "unexpected local dictionary from worker {} ({} workers, {} merged)",
                local.worker,
                self.worker_count,
                self.remaps.len()
            )));
        }
        self.pending.insert(local.worker, local.values);

        while let Some(values) = self.pending.remove(&self.remaps.len()) {
            let remap = self.merge_one(&values);
            log::trace!(
                "merged worker {}: {} local values, {} global values",
                self.remaps.len(),
                values.len(),
                self.dictionary.len()
            );
            self.remaps.push(remap);
        }
        Ok(())
    }

    /// Completes the merge.
    ///
    /// # Errors
    ///
    /// Fails with `WorkerFailed` if the local dictionary of any worker is missing.
    pub fn finish(self) -> Result<MergedDictionary> {
        if self.remaps.len() != self.worker_count {
            return Err(Error::worker_failed(format!(
                "merged {} of {} local dictionaries",
                self.remaps.len(),
                self.worker_count
            )));
        }
        debug_assert!(self.pending.is_empty());
        Ok(MergedDictionary {
            dictionary: self.dictionary,
            remaps: self.remaps,
        })
    }

    /// Runs the merge task: consumes local dictionaries until every sender is gone.
    pub fn run(mut self, receiver: Receiver<LocalDictionary>) -> Result<MergedDictionary> {
        for local in receiver.iter() {
            self.push(local)?;
        }
        self.finish()
    }

    fn merge_one(&mut self, values: &[Arc<str>]) -> Vec<u32> {
        values
            .iter()
            .map(|value| self.dictionary.get_or_insert_shared(value))
            .collect()
    }
}
