use num_traits::PrimInt;

/// Integer word types which can be viewed as a byte buffer.
///
/// Every implementor is a whole number of 64-bit words wide, so the byte length
/// of any slice of them is a multiple of 8.
pub trait BitsStoreType: PrimInt {
    fn bits_count() -> usize;
}

impl BitsStoreType for u64 {
    fn bits_count() -> usize {
        64
    }
}

impl BitsStoreType for u128 {
    fn bits_count() -> usize {
        128
    }
}
