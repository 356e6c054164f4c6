//! Dictionary-encoded string column.
//!
//! An [`EncodedColumn`] replaces every row of a string column with a dense `u32`
//! identifier and keeps a [`Dictionary`] recovering the original values.
//!
//! # Building
//!
//! [`EncodedColumn::build`] (or [`ColumnBuilder`]) splits the rows into
//! contiguous ranges, one per worker. Workers encode their range against a
//! private local dictionary, in parallel and without any shared state. Every
//! finished local dictionary is sent to a single merge task that folds them into
//! the global dictionary in ascending worker order, and the local codes are then
//! remapped to global identifiers. The build returns only after every worker has
//! finished and the merge has completed.
//!
//! # Querying
//!
//! A built column is immutable and `Sync`; any number of threads may query it.
//! Exact-match and prefix-match queries come in a batched (vectorized) flavor and
//! a scalar flavor, selected with [`ScanStrategy`], which always return identical
//! results.
//!
//! # Persistence
//!
//! [`EncodedColumn::serialize`] produces a debuggable text dump and
//! [`EncodedColumn::deserialize`] reconstructs the exact same column.

pub mod builder;
pub mod column;
pub mod dictionary;
mod encoder;
mod merge;
mod partition;
pub mod query;
pub mod serialization;

pub use builder::{BuildOptions, ColumnBuilder};
pub use column::EncodedColumn;
pub use dictcol_common::{Error, ErrorKind, Result};
pub use dictionary::Dictionary;
pub use query::{PrefixMatch, ScanStrategy, baseline};
