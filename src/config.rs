use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dispatch::Backend;
use crate::CountingError;

/// Which counting backend to use, `Auto` picks the fastest supported one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    #[default]
    Auto,
    Avx2,
    Portable,
}

impl BackendPreference {
    pub fn forced_backend(self) -> Option<Backend> {
        match self {
            BackendPreference::Auto => None,
            BackendPreference::Avx2 => Some(Backend::Avx2),
            BackendPreference::Portable => Some(Backend::Portable),
        }
    }
}

impl FromStr for BackendPreference {
    type Err = CountingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(BackendPreference::Auto),
            "avx2" => Ok(BackendPreference::Avx2),
            "portable" => Ok(BackendPreference::Portable),
            other => Err(CountingError::InvalidConfig(format!(
                "unknown backend `{other}`, expected one of: auto, avx2, portable"
            ))),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendPreference,
}

impl Config {
    /// Environment variable overriding the backend of the process-wide counter.
    pub const BACKEND_ENV: &'static str = "BITCOUNT_BACKEND";

    pub fn from_env() -> Self {
        let backend = match std::env::var(Self::BACKEND_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                log::warn!("Ignoring {}: {err}", Self::BACKEND_ENV);
                BackendPreference::Auto
            }),
            Err(_) => BackendPreference::Auto,
        };
        Config { backend }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let bytes = serde_json::to_vec(self)?;
        path.parent().map(std::fs::create_dir_all);
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        log::debug!("Loaded counting config from {}: {config:?}", path.display());
        Ok(config)
    }
}
