use std::sync::Arc;

use ahash::AHashMap;
use dictcol_common::{Result, error::Error};

/// Bidirectional mapping between distinct string values and dense `u32` identifiers.
///
/// Identifiers are assigned in insertion order starting from zero, with no gaps, and
/// are never reassigned. Both views share the same reference-counted string storage:
///
/// - `value_to_id`: hash lookup from value to identifier
/// - `id_to_value`: identifier-indexed list of values
///
/// The same type serves as a worker-local dictionary during the build (where ids are
/// local ids in first-seen order) and as the global dictionary of a built column.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    value_to_id: AHashMap<Arc<str>, u32>,
    id_to_value: Vec<Arc<str>>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary::default()
    }

    pub fn with_capacity(capacity: usize) -> Dictionary {
        Dictionary {
            value_to_id: AHashMap::with_capacity(capacity),
            id_to_value: Vec::with_capacity(capacity),
        }
    }

    /// Builds a dictionary whose identifiers follow the order of `values`.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidFormat` if `values` contains a duplicate.
    pub fn from_values<I, S>(values: I) -> Result<Dictionary>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let values = values.into_iter();
        let mut dictionary = Dictionary::with_capacity(values.size_hint().0);
        for value in values {
            let value = value.into();
            let id = dictionary.next_id();
            if dictionary.value_to_id.insert(value.clone(), id).is_some() {
                return Err(Error::invalid_format(
                    "dictionary",
                    format!("duplicate value '{value}' at id {id}"),
                ));
            }
            dictionary.id_to_value.push(value);
        }
        Ok(dictionary)
    }

    /// Number of distinct values.
    #[inline]
    pub fn len(&self) -> usize {
        self.id_to_value.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id_to_value.is_empty()
    }

    /// Returns the identifier of `value`, if present.
    #[inline]
    pub fn id_of(&self, value: &str) -> Option<u32> {
        self.value_to_id.get(value).copied()
    }

    /// Returns the value assigned to `id`, if any.
    #[inline]
    pub fn value_of(&self, id: u32) -> Option<&str> {
        self.id_to_value.get(id as usize).map(|v| v.as_ref())
    }

    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.value_to_id.contains_key(value)
    }

    /// Values in ascending identifier order.
    #[inline]
    pub fn values(&self) -> &[Arc<str>] {
        &self.id_to_value
    }

    /// Iterates `(id, value)` pairs in ascending identifier order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (u32, &str)> + '_ {
        self.id_to_value
            .iter()
            .enumerate()
            .map(|(id, value)| (id as u32, value.as_ref()))
    }

    /// Returns the identifier of `value`, assigning the next one if the value is new.
    #[inline]
    pub fn get_or_insert(&mut self, value: &str) -> u32 {
        if let Some(&id) = self.value_to_id.get(value) {
            return id;
        }
        self.insert_new(Arc::from(value))
    }

    /// Same as [`Dictionary::get_or_insert`], but shares the storage of `value`
    /// instead of copying the string.
    #[inline]
    pub fn get_or_insert_shared(&mut self, value: &Arc<str>) -> u32 {
        if let Some(&id) = self.value_to_id.get(value.as_ref()) {
            return id;
        }
        self.insert_new(value.clone())
    }

    /// Consumes the dictionary, returning its values in identifier order.
    pub fn into_values(self) -> Vec<Arc<str>> {
        self.id_to_value
    }

    fn insert_new(&mut self, value: Arc<str>) -> u32 {
        let id = self.next_id();
        self.value_to_id.insert(value.clone(), id);
        self.id_to_value.push(value);
        id
    }

    #[inline]
    fn next_id(&self) -> u32 {
        let id = self.id_to_value.len();
        assert!(id < u32::MAX as usize, "dictionary id space exhausted");
        id as u32
    }
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        // `value_to_id` is fully determined by `id_to_value`.
        self.id_to_value == other.id_to_value
    }
}

impl Eq for Dictionary {}
