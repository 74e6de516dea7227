use std::arch::x86_64::*;

use crate::simd::NIBBLE_POPCOUNT;

/// Popcount of every 64-bit lane.
///
/// Nibbles of every byte are looked up in a 16-entry shuffle table, the two partial counts
/// are added, and `sad` against zero sums each group of 8 bytes into its 64-bit lane.
#[target_feature(enable = "avx2")]
#[allow(clippy::missing_safety_doc)]
#[inline]
pub unsafe fn mm256_popcnt_epi64(p: __m256i) -> __m256i {
    let lut = _mm256_loadu_si256(NIBBLE_POPCOUNT.as_ptr() as *const __m256i);
    let low_mask = _mm256_set1_epi8(0x0F);

    let low = _mm256_and_si256(p, low_mask);
    // there is no byte shift, shift 32-bit lanes and mask off the bits of the neighbour
    let high = _mm256_and_si256(_mm256_srli_epi32::<4>(p), low_mask);
    let count_low = _mm256_shuffle_epi8(lut, low);
    let count_high = _mm256_shuffle_epi8(lut, high);
    _mm256_sad_epu8(
        _mm256_add_epi8(count_low, count_high),
        _mm256_setzero_si256(),
    )
}
