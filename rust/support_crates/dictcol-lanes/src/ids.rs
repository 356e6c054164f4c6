//! Equality scans over `u32` identifier arrays.
//!
//! The batched kernels process the input in batches of [`ID_LANES`] identifiers:
//! the needle is broadcast across the batch, compared lane-wise, and the match
//! bitmask is turned back into offsets. A tail shorter than one batch is always
//! compared by the scalar loop.

use crate::{CompareKernel, ID_LANES, push_mask_positions};

/// Compares a single batch of identifiers against `target`.
///
/// Bit `i` of the result is set when `batch[i] == target`.
#[inline]
pub fn lane_eq_mask(kernel: CompareKernel, batch: &[u32; ID_LANES], target: u32) -> u8 {
    match kernel.or_portable() {
        CompareKernel::Scalar | CompareKernel::Portable => lane_eq_mask_portable(batch, target),
        CompareKernel::Avx2 => {
            #[cfg(target_arch = "x86_64")]
            {
                unsafe { lane_eq_mask_avx2(batch, target) }
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                lane_eq_mask_portable(batch, target)
            }
        }
    }
}

/// Appends to `out` the position of every element of `ids` equal to `target`,
/// in ascending order.
///
/// All kernels produce identical output for any input length.
#[inline]
pub fn collect_eq_positions(kernel: CompareKernel, ids: &[u32], target: u32, out: &mut Vec<usize>) {
    match kernel.or_portable() {
        CompareKernel::Scalar => collect_eq_positions_scalar(ids, target, 0, out),
        CompareKernel::Portable => collect_eq_positions_portable(ids, target, out),
        CompareKernel::Avx2 => {
            #[cfg(target_arch = "x86_64")]
            {
                unsafe { collect_eq_positions_avx2(ids, target, out) }
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                collect_eq_positions_portable(ids, target, out)
            }
        }
    }
}

/// Convenience wrapper around [`collect_eq_positions`] returning a new vector.
pub fn eq_positions(kernel: CompareKernel, ids: &[u32], target: u32) -> Vec<usize> {
    let mut out = Vec::new();
    collect_eq_positions(kernel, ids, target, &mut out);
    out
}

#[inline]
fn collect_eq_positions_scalar(ids: &[u32], target: u32, base: usize, out: &mut Vec<usize>) {
    for (i, &id) in ids.iter().enumerate() {
        if id == target {
            out.push(base + i);
        }
    }
}

#[inline]
fn lane_eq_mask_portable(batch: &[u32; ID_LANES], target: u32) -> u8 {
    let mut mask = 0u8;
    for (lane, &id) in batch.iter().enumerate() {
        mask |= ((id == target) as u8) << lane;
    }
    mask
}

fn collect_eq_positions_portable(ids: &[u32], target: u32, out: &mut Vec<usize>) {
    let (batches, rest) = ids.as_chunks::<ID_LANES>();
    for (i, batch) in batches.iter().enumerate() {
        let mask = lane_eq_mask_portable(batch, target);
        push_mask_positions(mask as u32, i * ID_LANES, out);
    }
    collect_eq_positions_scalar(rest, target, batches.len() * ID_LANES, out);
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[inline]
unsafe fn lane_eq_mask_avx2(batch: &[u32; ID_LANES], target: u32) -> u8 {
    use std::arch::x86_64::{
        __m256i, _mm256_castsi256_ps, _mm256_cmpeq_epi32, _mm256_loadu_si256,
        _mm256_movemask_ps, _mm256_set1_epi32,
    };

    unsafe {
        let needle = _mm256_set1_epi32(target as i32);
        let values = _mm256_loadu_si256(batch.as_ptr() as *const __m256i);
        let eq = _mm256_cmpeq_epi32(values, needle);
        _mm256_movemask_ps(_mm256_castsi256_ps(eq)) as u8
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn collect_eq_positions_avx2(ids: &[u32], target: u32, out: &mut Vec<usize>) {
    use std::arch::x86_64::{
        __m256i, _mm256_castsi256_ps, _mm256_cmpeq_epi32, _mm256_loadu_si256,
        _mm256_movemask_ps, _mm256_set1_epi32,
    };

    let (batches, rest) = ids.as_chunks::<ID_LANES>();
    unsafe {
        let needle = _mm256_set1_epi32(target as i32);
        for (i, batch) in batches.iter().enumerate() {
            // Unaligned load: the id array carries no alignment guarantee.
            let values = _mm256_loadu_si256(batch.as_ptr() as *const __m256i);
            let eq = _mm256_cmpeq_epi32(values, needle);
            let mask = _mm256_movemask_ps(_mm256_castsi256_ps(eq)) as u32;
            if mask != 0 {
                push_mask_positions(mask, i * ID_LANES, out);
            }
        }
    }
    collect_eq_positions_scalar(rest, target, batches.len() * ID_LANES, out);
}
