//! Dispatcher configuration.
//!
//! Layered with figment, lowest priority first:
//! 1. built-in defaults
//! 2. `simdist.toml` in the working directory (optional)
//! 3. `SIMDIST_*` environment variables, e.g. `SIMDIST_MAX_TIER=avx2`

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::simd_native::InstructionTier;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "simdist.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SIMDIST_";

/// How the process-wide dispatcher picks and checks its kernel set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimdConfig {
    /// Highest tier to use. Can only lower the detected tier.
    pub max_tier: Option<InstructionTier>,
    /// Verify the selected kernels against the baseline at startup.
    pub self_test: bool,
    /// Run a short warm-up pass after initialization.
    pub warmup: bool,
}

impl Default for SimdConfig {
    fn default() -> Self {
        Self {
            max_tier: None,
            self_test: true,
            warmup: false,
        }
    }
}

impl SimdConfig {
    /// Loads defaults, then `simdist.toml`, then `SIMDIST_*` variables.
    pub fn load() -> Result<Self> {
        Self::from_file(CONFIG_FILE)
    }

    /// Like [`SimdConfig::load`] with an explicit file. A missing file is
    /// skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        Ok(config)
    }

    /// Returns a copy capped at `tier`.
    #[must_use]
    pub fn with_max_tier(mut self, tier: InstructionTier) -> Self {
        self.max_tier = Some(tier);
        self
    }
}
