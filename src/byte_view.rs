use crate::bits_store::BitsStoreType;
use crate::dispatch::Counter;
use crate::utils::transmute_to_u8_slice;
use crate::{CountingError, WORD_BYTES};

/// Borrowed read-only bytes to count set bits in.
///
/// A view built with [`ByteView::new`] or [`ByteView::from_words`] always covers
/// a whole number of 8-byte words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self, CountingError> {
        if bytes.len() % WORD_BYTES != 0 {
            return Err(CountingError::InvalidLength {
                length: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Build a view without checking the length.
    ///
    /// If `bytes.len()` is not a multiple of 8, the final partial word is not counted.
    pub fn new_unchecked(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn from_words<T: BitsStoreType>(words: &'a [T]) -> Self {
        debug_assert_eq!(T::bits_count() % (8 * WORD_BYTES), 0);
        Self {
            bytes: transmute_to_u8_slice(words),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of trailing bytes which are ignored by the counting kernel.
    pub fn uncounted_len(&self) -> usize {
        self.bytes.len() % WORD_BYTES
    }

    pub fn count_ones(&self) -> u64 {
        Counter::global().count(*self)
    }
}

impl<'a> TryFrom<&'a [u8]> for ByteView<'a> {
    type Error = CountingError;

    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_length() {
        let data = vec![0xFFu8; 1025];
        assert_eq!(
            ByteView::new(&data),
            Err(CountingError::InvalidLength { length: 1025 })
        );
        assert!(ByteView::new(&data[..1024]).is_ok());
        assert!(ByteView::new(&[]).unwrap().is_empty());

        assert_eq!(
            ByteView::try_from(&data[..]),
            Err(CountingError::InvalidLength { length: 1025 })
        );
        let view: ByteView = (&data[..16]).try_into().unwrap();
        assert_eq!(view.len(), 16);
    }

    #[test]
    fn test_unchecked_keeps_length() {
        let data = [0u8; 13];
        let view = ByteView::new_unchecked(&data);
        assert_eq!(view.len(), 13);
        assert_eq!(view.uncounted_len(), 5);
    }

    #[test]
    fn test_from_words() {
        let words = [u64::MAX, 0, 1];
        let view = ByteView::from_words(&words);
        assert_eq!(view.len(), 24);
        assert_eq!(view.uncounted_len(), 0);
        assert_eq!(view.count_ones(), 65);

        let wide = [u128::MAX; 3];
        assert_eq!(ByteView::from_words(&wide).count_ones(), 3 * 128);
    }
}
