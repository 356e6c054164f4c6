//! Read-only lookups against a built [`EncodedColumn`](crate::EncodedColumn).
//!
//! - [`exact`]: rows holding a given value.
//! - [`prefix`]: distinct values starting with a given byte prefix, with their rows.
//! - [`baseline`]: the same lookups over raw rows, without a dictionary.
//!
//! Every query accepts a [`ScanStrategy`]. The batched and scalar strategies are
//! interchangeable: they return identical results for every input.

use std::str::FromStr;

use dictcol_common::error::Error;
use dictcol_lanes::CompareKernel;
use serde::Serialize;

pub mod baseline;
pub mod exact;
pub mod prefix;

/// Selects how a query compares values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScanStrategy {
    /// The fastest batched kernel supported by the running CPU.
    #[default]
    Auto,
    /// Element-at-a-time comparison.
    Scalar,
    /// Batched lane comparison (AVX2 when available, portable batches otherwise).
    Vectorized,
}

impl ScanStrategy {
    /// Resolves the strategy to a compare kernel via runtime capability detection.
    pub fn kernel(self) -> CompareKernel {
        match self {
            ScanStrategy::Scalar => CompareKernel::Scalar,
            ScanStrategy::Auto | ScanStrategy::Vectorized => CompareKernel::detect(),
        }
    }
}

impl FromStr for ScanStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ScanStrategy::Auto),
            "scalar" => Ok(ScanStrategy::Scalar),
            "vectorized" | "simd" => Ok(ScanStrategy::Vectorized),
            other => Err(Error::invalid_config(
                "scan strategy",
                format!("unknown strategy '{other}', expected auto, scalar or vectorized"),
            )),
        }
    }
}

/// One distinct value matched by a prefix query, with every row holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixMatch {
    pub value: String,
    /// Ascending row indices.
    pub rows: Vec<usize>,
}

impl PrefixMatch {
    pub fn new(value: impl Into<String>, rows: Vec<usize>) -> PrefixMatch {
        PrefixMatch {
            value: value.into(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("auto".parse::<ScanStrategy>().unwrap(), ScanStrategy::Auto);
        assert_eq!("Scalar".parse::<ScanStrategy>().unwrap(), ScanStrategy::Scalar);
        assert_eq!("simd".parse::<ScanStrategy>().unwrap(), ScanStrategy::Vectorized);
        assert!("fast".parse::<ScanStrategy>().unwrap_err().is_invalid_config());
    }

    #[test]
    fn test_strategy_kernel() {
        assert_eq!(ScanStrategy::Scalar.kernel(), CompareKernel::Scalar);
        assert!(ScanStrategy::Vectorized.kernel().is_batched());
        assert!(ScanStrategy::Auto.kernel().is_supported());
    }
}
