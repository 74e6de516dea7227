pub mod bits_store;
pub mod byte_view;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod pyramid;
pub mod simd;
pub mod utils;

pub use bits_store::BitsStoreType;
pub use byte_view::ByteView;
pub use config::{BackendPreference, Config};
pub use dispatch::{selected_backend, Backend, Counter};

/// Bytes consumed by one scalar popcount in the tail tier.
pub const WORD_BYTES: usize = 8;

/// Width of one wide vector load.
pub const VECTOR_BYTES: usize = 32;

/// Bytes folded into the bit-plane pyramid per Harley-Seal iteration.
pub const BLOCK_BYTES: usize = 16 * VECTOR_BYTES;

/// Minimal input size for entering the Harley-Seal tier.
pub const HARLEY_SEAL_THRESHOLD: usize = 2 * BLOCK_BYTES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountingError {
    InvalidLength { length: usize },
    UnsupportedHardware(Backend),
    InvalidConfig(String),
}

impl std::fmt::Display for CountingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountingError::InvalidLength { length } => {
                write!(f, "Buffer length {length} is not a multiple of {WORD_BYTES}")
            }
            CountingError::UnsupportedHardware(backend) => {
                write!(f, "Backend {backend} is not supported by this CPU")
            }
            CountingError::InvalidConfig(description) => {
                write!(f, "Invalid configuration: {description}")
            }
        }
    }
}

impl std::error::Error for CountingError {}

/// Count set bits of `bytes` with the process-wide backend.
///
/// Returns [`CountingError::InvalidLength`] if `bytes.len()` is not a multiple of 8.
pub fn count_set_bits(bytes: &[u8]) -> Result<u64, CountingError> {
    Counter::global().count_bytes(bytes)
}

/// Count set bits of `bytes` without validating the length.
///
/// The final `bytes.len() % 8` bytes are not counted.
pub fn count_set_bits_truncating(bytes: &[u8]) -> u64 {
    Counter::global().count(ByteView::new_unchecked(bytes))
}

/// Count set bits of a word slice. Always a multiple of 8 bytes, so it can't fail.
pub fn count_words<T: BitsStoreType>(words: &[T]) -> u64 {
    Counter::global().count(ByteView::from_words(words))
}
