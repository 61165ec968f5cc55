//! x86_64 block primitives. Callers dispatch through [`crate::Kernel`],
//! which only hands out a level the CPU reported at detection time.

use core::arch::x86_64::*;

/// # Safety
///
/// SSE2 must be available and `block` must hold at least 16 readable bytes.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn match_byte16(block: &[u8], c: u8) -> u32 {
    debug_assert!(block.len() >= 16);
    // SAFETY: 16 readable bytes; unaligned load.
    unsafe {
        let v = _mm_loadu_si128(block.as_ptr() as *const __m128i);
        let hits = _mm_cmpeq_epi8(v, _mm_set1_epi8(c as i8));
        _mm_movemask_epi8(hits) as u32
    }
}

/// # Safety
///
/// SSE2 must be available and `block` must hold at least 16 readable bytes.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn match_set16(block: &[u8], set: &[u8]) -> u32 {
    debug_assert!(block.len() >= 16);
    // SAFETY: 16 readable bytes; unaligned load.
    unsafe {
        let v = _mm_loadu_si128(block.as_ptr() as *const __m128i);
        let mut hits = _mm_setzero_si128();
        for &s in set {
            hits = _mm_or_si128(hits, _mm_cmpeq_epi8(v, _mm_set1_epi8(s as i8)));
        }
        _mm_movemask_epi8(hits) as u32
    }
}

/// # Safety
///
/// SSE2 must be available and both blocks must hold at least 16 readable
/// bytes.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn compare16(a: &[u8], b: &[u8]) -> u32 {
    debug_assert!(a.len() >= 16 && b.len() >= 16);
    // SAFETY: 16 readable bytes each; unaligned loads.
    unsafe {
        let va = _mm_loadu_si128(a.as_ptr() as *const __m128i);
        let vb = _mm_loadu_si128(b.as_ptr() as *const __m128i);
        _mm_movemask_epi8(_mm_cmpeq_epi8(va, vb)) as u32
    }
}

/// # Safety
///
/// AVX2 must be available and `block` must hold at least 32 readable bytes.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn match_byte32(block: &[u8], c: u8) -> u32 {
    debug_assert!(block.len() >= 32);
    // SAFETY: 32 readable bytes; unaligned load.
    unsafe {
        let v = _mm256_loadu_si256(block.as_ptr() as *const __m256i);
        let hits = _mm256_cmpeq_epi8(v, _mm256_set1_epi8(c as i8));
        _mm256_movemask_epi8(hits) as u32
    }
}

/// # Safety
///
/// AVX2 must be available and `block` must hold at least 32 readable bytes.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn match_set32(block: &[u8], set: &[u8]) -> u32 {
    debug_assert!(block.len() >= 32);
    // SAFETY: 32 readable bytes; unaligned load.
    unsafe {
        let v = _mm256_loadu_si256(block.as_ptr() as *const __m256i);
        let mut hits = _mm256_setzero_si256();
        for &s in set {
            hits = _mm256_or_si256(hits, _mm256_cmpeq_epi8(v, _mm256_set1_epi8(s as i8)));
        }
        _mm256_movemask_epi8(hits) as u32
    }
}

/// # Safety
///
/// AVX2 must be available and both blocks must hold at least 32 readable
/// bytes.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn compare32(a: &[u8], b: &[u8]) -> u32 {
    debug_assert!(a.len() >= 32 && b.len() >= 32);
    // SAFETY: 32 readable bytes each; unaligned loads.
    unsafe {
        let va = _mm256_loadu_si256(a.as_ptr() as *const __m256i);
        let vb = _mm256_loadu_si256(b.as_ptr() as *const __m256i);
        _mm256_movemask_epi8(_mm256_cmpeq_epi8(va, vb)) as u32
    }
}
