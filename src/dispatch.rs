//! Backend selection.
//!
//! The process-wide backend is resolved once, from [`Config::from_env`] and runtime
//! CPU feature detection, and cached for the lifetime of the process.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::byte_view::ByteView;
use crate::config::{BackendPreference, Config};
use crate::{driver, CountingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// 256-bit AVX2 vectors with a hardware `popcnt` tail.
    Avx2,
    /// Four `u64` lanes emulating the AVX2 operations.
    Portable,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Avx2 => "avx2",
            Backend::Portable => "portable",
        }
    }

    pub fn is_supported(self) -> bool {
        match self {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => is_x86_feature_detected!("avx2") && is_x86_feature_detected!("popcnt"),
            #[cfg(not(target_arch = "x86_64"))]
            Backend::Avx2 => false,
            Backend::Portable => true,
        }
    }

    /// Fastest backend supported by the running CPU.
    pub fn detect() -> Backend {
        if Backend::Avx2.is_supported() {
            Backend::Avx2
        } else {
            Backend::Portable
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = CountingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<BackendPreference>()?.forced_backend() {
            Some(backend) => Ok(backend),
            None => Ok(Backend::detect()),
        }
    }
}

static SELECTED: OnceLock<Backend> = OnceLock::new();

/// Backend used by [`Counter::global`], resolved on first use.
pub fn selected_backend() -> Backend {
    *SELECTED.get_or_init(|| {
        let config = Config::from_env();
        let backend = match Counter::from_config(&config) {
            Ok(counter) => counter.backend(),
            Err(err) => {
                log::warn!("{err}, falling back to runtime detection");
                Backend::detect()
            }
        };
        log::debug!("Selected popcount backend: {backend}");
        backend
    })
}

/// Set bit counter bound to a backend the CPU is known to support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    backend: Backend,
}

impl Counter {
    pub fn new(backend: Backend) -> Result<Self, CountingError> {
        if !backend.is_supported() {
            return Err(CountingError::UnsupportedHardware(backend));
        }
        Ok(Counter { backend })
    }

    pub fn from_config(config: &Config) -> Result<Self, CountingError> {
        match config.backend.forced_backend() {
            Some(backend) => Self::new(backend),
            None => Self::new(Backend::detect()),
        }
    }

    /// Counter with the process-wide backend.
    pub fn global() -> Self {
        Counter {
            backend: selected_backend(),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn count(&self, view: ByteView) -> u64 {
        let bytes = view.as_bytes();
        match self.backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => unsafe { driver::count_ones_avx2(bytes) },
            #[cfg(not(target_arch = "x86_64"))]
            Backend::Avx2 => unreachable!("avx2 counter can't be constructed on this target"),
            Backend::Portable => driver::count_ones_portable(bytes),
        }
    }

    pub fn count_bytes(&self, bytes: &[u8]) -> Result<u64, CountingError> {
        Ok(self.count(ByteView::new(bytes)?))
    }
}
