//! Fixed-width lane compare kernels for dictcol scans.
//!
//! This crate provides the "batch compare" primitives the column query engine is
//! built on: a fixed-width batch of values is compared against a needle (or against
//! another batch) and the outcome is returned as a bitmask, one bit per lane,
//! LSB first.
//!
//! # Kernels
//!
//! - [`CompareKernel::Scalar`]: element-at-a-time comparison, no batching. This is
//!   the reference behavior every other kernel must reproduce.
//! - [`CompareKernel::Portable`]: batched lane compare written in plain Rust,
//!   available on every target.
//! - [`CompareKernel::Avx2`]: AVX2 intrinsics, only selected when the running CPU
//!   reports the feature.
//!
//! [`CompareKernel::detect`] performs the runtime capability check. A kernel that
//! is requested but not supported by the host degrades to `Portable`.
//!
//! # Widths
//!
//! - Identifier batches are [`ID_LANES`] (8) `u32` values, i.e. one 256-bit register.
//! - Byte batches are [`BYTE_LANES`] (32) bytes, i.e. one 256-bit register. Longer
//!   byte ranges are compared chunk by chunk; the final partial chunk is validated
//!   under [`low_lanes_mask`], which never shifts by the full register width.

pub mod bytes;
pub mod ids;
mod kernel;

pub use kernel::CompareKernel;

/// Number of `u32` identifiers compared by a single batch operation.
pub const ID_LANES: usize = 8;

/// Number of bytes compared by a single batch operation.
pub const BYTE_LANES: usize = 32;

/// Returns a mask with the lowest `n` lanes set, saturating at [`BYTE_LANES`].
///
/// `low_lanes_mask(0) == 0` and `low_lanes_mask(n) == u32::MAX` for any
/// `n >= BYTE_LANES`.
#[inline]
pub const fn low_lanes_mask(n: usize) -> u32 {
    if n >= BYTE_LANES {
        u32::MAX
    } else {
        (1u32 << n) - 1
    }
}

/// Appends `base + lane` to `out` for every set bit of `mask`, in ascending lane order.
#[inline]
pub(crate) fn push_mask_positions(mut mask: u32, base: usize, out: &mut Vec<usize>) {
    while mask != 0 {
        let lane = mask.trailing_zeros() as usize;
        out.push(base + lane);
        mask &= mask - 1;
    }
}
