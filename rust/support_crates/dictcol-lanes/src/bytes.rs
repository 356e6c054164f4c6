//! Byte-wise prefix comparison in register-width chunks.
//!
//! A single byte compare covers [`BYTE_LANES`] bytes. Prefixes longer than that
//! are validated chunk by chunk until every prefix byte has been compared; the
//! final partial chunk is zero-padded on both sides and checked under
//! [`low_lanes_mask`].

use crate::{BYTE_LANES, CompareKernel, low_lanes_mask};

/// Compares two byte batches lane by lane.
///
/// Bit `i` of the result is set when `a[i] == b[i]`.
#[inline]
pub fn byte_lanes_eq_mask(
    kernel: CompareKernel,
    a: &[u8; BYTE_LANES],
    b: &[u8; BYTE_LANES],
) -> u32 {
    match kernel.or_portable() {
        CompareKernel::Scalar | CompareKernel::Portable => byte_lanes_eq_mask_portable(a, b),
        CompareKernel::Avx2 => {
            #[cfg(target_arch = "x86_64")]
            {
                unsafe { byte_lanes_eq_mask_avx2(a, b) }
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                byte_lanes_eq_mask_portable(a, b)
            }
        }
    }
}

/// Returns `true` when the first `prefix.len()` bytes of `value` equal `prefix`.
///
/// `value` shorter than `prefix` never matches. An empty prefix matches every value;
/// callers that consider an empty prefix invalid must reject it beforehand.
#[inline]
pub fn starts_with(kernel: CompareKernel, value: &[u8], prefix: &[u8]) -> bool {
    if value.len() < prefix.len() {
        return false;
    }
    match kernel.or_portable() {
        CompareKernel::Scalar => starts_with_scalar(value, prefix),
        CompareKernel::Portable => starts_with_chunked(value, prefix, byte_lanes_eq_mask_portable),
        CompareKernel::Avx2 => {
            #[cfg(target_arch = "x86_64")]
            {
                unsafe { starts_with_avx2(value, prefix) }
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                starts_with_chunked(value, prefix, byte_lanes_eq_mask_portable)
            }
        }
    }
}

#[inline]
fn starts_with_scalar(value: &[u8], prefix: &[u8]) -> bool {
    value.iter().zip(prefix).all(|(v, p)| v == p)
}

#[inline(always)]
fn starts_with_chunked<F>(value: &[u8], prefix: &[u8], eq_mask: F) -> bool
where
    F: Fn(&[u8; BYTE_LANES], &[u8; BYTE_LANES]) -> u32,
{
    let head = &value[..prefix.len()];
    let (prefix_chunks, prefix_tail) = prefix.as_chunks::<BYTE_LANES>();
    let (head_chunks, head_tail) = head.as_chunks::<BYTE_LANES>();
    debug_assert_eq!(prefix_chunks.len(), head_chunks.len());

    for (p, h) in prefix_chunks.iter().zip(head_chunks) {
        if eq_mask(p, h) != u32::MAX {
            return false;
        }
    }

    if prefix_tail.is_empty() {
        return true;
    }

    let mut p = [0u8; BYTE_LANES];
    let mut h = [0u8; BYTE_LANES];
    p[..prefix_tail.len()].copy_from_slice(prefix_tail);
    h[..head_tail.len()].copy_from_slice(head_tail);
    let required = low_lanes_mask(prefix_tail.len());
    eq_mask(&p, &h) & required == required
}

#[inline]
fn byte_lanes_eq_mask_portable(a: &[u8; BYTE_LANES], b: &[u8; BYTE_LANES]) -> u32 {
    let mut mask = 0u32;
    for lane in 0..BYTE_LANES {
        mask |= ((a[lane] == b[lane]) as u32) << lane;
    }
    mask
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[inline]
unsafe fn byte_lanes_eq_mask_avx2(a: &[u8; BYTE_LANES], b: &[u8; BYTE_LANES]) -> u32 {
    use std::arch::x86_64::{__m256i, _mm256_cmpeq_epi8, _mm256_loadu_si256, _mm256_movemask_epi8};

    unsafe {
        let va = _mm256_loadu_si256(a.as_ptr() as *const __m256i);
        let vb = _mm256_loadu_si256(b.as_ptr() as *const __m256i);
        _mm256_movemask_epi8(_mm256_cmpeq_epi8(va, vb)) as u32
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn starts_with_avx2(value: &[u8], prefix: &[u8]) -> bool {
    starts_with_chunked(value, prefix, |a, b| unsafe { byte_lanes_eq_mask_avx2(a, b) })
}
