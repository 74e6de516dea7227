use std::mem;

use num_traits::PrimInt;

use crate::bits_store::BitsStoreType;

pub fn transmute_to_u8_slice<T: BitsStoreType>(v: &[T]) -> &[u8] {
    // `BitsStoreType` is only implemented for plain integers, no padding bytes
    unsafe { std::slice::from_raw_parts(v.as_ptr() as *const u8, mem::size_of_val(v)) }
}

/// Reference implementation of the set bit count, one `count_ones` per element.
pub fn count_ones_naive<T: PrimInt>(v: &[T]) -> u64 {
    v.iter().map(|x| x.count_ones() as u64).sum()
}
