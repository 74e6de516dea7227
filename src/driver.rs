use crate::pyramid::{BitPlanes, BLOCK_VECTORS};
use crate::simd::WideVector;
use crate::{BLOCK_BYTES, HARLEY_SEAL_THRESHOLD, WORD_BYTES};

/// Count set bits of `bytes`, walking them once from largest to smallest tier.
///
/// A trailing partial word (`bytes.len() % 8` bytes) is not counted.
///
/// # Safety
///
/// CPU must support every feature `V` relies on.
#[inline(always)]
pub unsafe fn count_ones<V: WideVector>(bytes: &[u8]) -> u64 {
    let len = bytes.len();
    let ptr = bytes.as_ptr();
    let mut total = V::zero();
    let mut i = 0;

    if len >= HARLEY_SEAL_THRESHOLD {
        let mut planes = BitPlanes::<V>::new();
        let mut block = [V::zero(); BLOCK_VECTORS];
        while len - i >= BLOCK_BYTES {
            for (j, v) in block.iter_mut().enumerate() {
                *v = V::load(ptr.add(i + j * V::BYTES));
            }
            let sixteens = planes.fold_block(&block);
            total = total.add_lanes(sixteens.popcount_lanes());
            i += BLOCK_BYTES;
        }
        total = planes.drain_into(total);
    }

    while len - i >= 2 * V::BYTES {
        total = total.add_lanes(V::load(ptr.add(i)).popcount_lanes());
        total = total.add_lanes(V::load(ptr.add(i + V::BYTES)).popcount_lanes());
        i += 2 * V::BYTES;
    }

    while len - i >= V::BYTES {
        total = total.add_lanes(V::load(ptr.add(i)).popcount_lanes());
        i += V::BYTES;
    }

    let mut result = total.horizontal_sum();

    while len - i >= WORD_BYTES {
        let word = std::ptr::read_unaligned(ptr.add(i) as *const u64);
        result += V::popcount_word(word);
        i += WORD_BYTES;
    }

    result
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,popcnt")]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn count_ones_avx2(bytes: &[u8]) -> u64 {
    count_ones::<crate::simd::avx2::Avx2Vector>(bytes)
}

pub fn count_ones_portable(bytes: &[u8]) -> u64 {
    unsafe { count_ones::<crate::simd::portable::PortableVector>(bytes) }
}
