pub mod popcnt;

use std::arch::x86_64::*;

use super::WideVector;

pub use popcnt::mm256_popcnt_epi64;

#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Avx2Vector(pub __m256i);

#[target_feature(enable = "avx2")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn hsum256_epi64_avx(x: __m256i) -> u64 {
    let x128: __m128i = _mm_add_epi64(_mm256_castsi256_si128(x), _mm256_extracti128_si256::<1>(x));
    // 78 = 0b01_00_11_10 swaps the two 64-bit lanes
    let x64: __m128i = _mm_add_epi64(x128, _mm_shuffle_epi32::<78>(x128));
    _mm_cvtsi128_si64(x64) as u64
}

unsafe impl WideVector for Avx2Vector {
    #[inline(always)]
    unsafe fn zero() -> Self {
        Avx2Vector(_mm256_setzero_si256())
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        Avx2Vector(_mm256_loadu_si256(ptr as *const __m256i))
    }

    #[inline(always)]
    unsafe fn and(self, other: Self) -> Self {
        Avx2Vector(_mm256_and_si256(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn or(self, other: Self) -> Self {
        Avx2Vector(_mm256_or_si256(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn xor(self, other: Self) -> Self {
        Avx2Vector(_mm256_xor_si256(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn add_lanes(self, other: Self) -> Self {
        Avx2Vector(_mm256_add_epi64(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn shl_lanes<const BITS: i32>(self) -> Self {
        Avx2Vector(_mm256_slli_epi64::<BITS>(self.0))
    }

    #[inline(always)]
    unsafe fn popcount_lanes(self) -> Self {
        Avx2Vector(mm256_popcnt_epi64(self.0))
    }

    #[inline(always)]
    unsafe fn horizontal_sum(self) -> u64 {
        hsum256_epi64_avx(self.0)
    }

    #[inline(always)]
    unsafe fn popcount_word(word: u64) -> u64 {
        _popcnt64(word as i64) as u64
    }
}
