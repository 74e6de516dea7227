use super::{WideVector, NIBBLE_POPCOUNT};

/// Scalar emulation of a 256-bit vector as four 64-bit lanes in memory order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortableVector(pub [u64; 4]);

impl PortableVector {
    #[inline(always)]
    fn map2(self, other: Self, f: impl Fn(u64, u64) -> u64) -> Self {
        let [a0, a1, a2, a3] = self.0;
        let [b0, b1, b2, b3] = other.0;
        PortableVector([f(a0, b0), f(a1, b1), f(a2, b2), f(a3, b3)])
    }
}

/// Nibble table lookup for every byte of `lane`, then the byte sum of the 8 partial counts.
#[inline(always)]
fn popcount_lane(lane: u64) -> u64 {
    lane.to_ne_bytes()
        .iter()
        .map(|&byte| {
            let low = NIBBLE_POPCOUNT[(byte & 0x0F) as usize];
            let high = NIBBLE_POPCOUNT[(byte >> 4) as usize];
            (low + high) as u64
        })
        .sum()
}

unsafe impl WideVector for PortableVector {
    #[inline(always)]
    unsafe fn zero() -> Self {
        PortableVector([0; 4])
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> Self {
        PortableVector(std::ptr::read_unaligned(ptr as *const [u64; 4]))
    }

    #[inline(always)]
    unsafe fn and(self, other: Self) -> Self {
        self.map2(other, |a, b| a & b)
    }

    #[inline(always)]
    unsafe fn or(self, other: Self) -> Self {
        self.map2(other, |a, b| a | b)
    }

    #[inline(always)]
    unsafe fn xor(self, other: Self) -> Self {
        self.map2(other, |a, b| a ^ b)
    }

    #[inline(always)]
    unsafe fn add_lanes(self, other: Self) -> Self {
        self.map2(other, u64::wrapping_add)
    }

    #[inline(always)]
    unsafe fn shl_lanes<const BITS: i32>(self) -> Self {
        PortableVector(self.0.map(|lane| lane << BITS))
    }

    #[inline(always)]
    unsafe fn popcount_lanes(self) -> Self {
        PortableVector(self.0.map(popcount_lane))
    }

    #[inline(always)]
    unsafe fn horizontal_sum(self) -> u64 {
        let [a0, a1, a2, a3] = self.0;
        // same pairing as the native reduction: halves first, then the two remaining lanes
        let (low, high) = (a0.wrapping_add(a2), a1.wrapping_add(a3));
        low.wrapping_add(high)
    }

    #[inline(always)]
    unsafe fn popcount_word(word: u64) -> u64 {
        word.count_ones() as u64
    }
}
