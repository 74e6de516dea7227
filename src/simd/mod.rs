//! Wide vector primitives used by the counting kernel.
//!
//! [`WideVector`] is the narrow set of 256-bit operations the Harley-Seal kernel needs.
//! `avx2` maps them onto native instructions, `portable` emulates them with four `u64` lanes.

#[cfg(target_arch = "x86_64")]
pub mod avx2;
pub mod portable;

/// Bit count of every nibble value `0..16`, repeated for both 128-bit halves of a shuffle table.
pub const NIBBLE_POPCOUNT: [u8; 32] = [
    0, 1, 1, 2, 1, 2, 2, 3, 1, 2, 2, 3, 2, 3, 3, 4, // low half
    0, 1, 1, 2, 1, 2, 2, 3, 1, 2, 2, 3, 2, 3, 3, 4, // high half
];

/// 256-bit vector, viewed as 32 bytes or as four 64-bit lanes.
///
/// # Safety
///
/// Implementors may rely on CPU features. Callers must only use an implementation
/// after checking that the features it needs are available.
pub unsafe trait WideVector: Copy {
    const BYTES: usize = crate::VECTOR_BYTES;

    unsafe fn zero() -> Self;

    /// Unaligned load of `Self::BYTES` bytes.
    unsafe fn load(ptr: *const u8) -> Self;

    unsafe fn and(self, other: Self) -> Self;

    unsafe fn or(self, other: Self) -> Self;

    unsafe fn xor(self, other: Self) -> Self;

    /// Lanewise wrapping add of 64-bit lanes.
    unsafe fn add_lanes(self, other: Self) -> Self;

    /// Lanewise left shift of 64-bit lanes.
    unsafe fn shl_lanes<const BITS: i32>(self) -> Self;

    /// Number of set bits in every 64-bit lane.
    unsafe fn popcount_lanes(self) -> Self;

    /// Sum of all four 64-bit lanes.
    unsafe fn horizontal_sum(self) -> u64;

    /// Bit count of a single scalar word.
    unsafe fn popcount_word(word: u64) -> u64;
}

/// Carry-save adder: returns `(carry, sum)`, the majority and the parity of `a`, `b`, `c`
/// for every bit position.
#[inline(always)]
#[allow(clippy::missing_safety_doc)]
pub unsafe fn csa<V: WideVector>(a: V, b: V, c: V) -> (V, V) {
    let u = a.xor(b);
    let carry = a.and(b).or(u.and(c));
    let sum = u.xor(c);
    (carry, sum)
}
