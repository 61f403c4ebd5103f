//! CLI configuration.
//!
//! Settings come from the environment and may be overridden by global flags.
//! Flags win over environment variables, which win over the defaults.

use dpk_core::{CanonicalForm, ConfigError, DeriverConfig, DpkError, KeyDeriver};

/// Environment variable for the explicit-key length threshold.
pub const ENV_MAX_KEY_LENGTH: &str = "DPK_MAX_KEY_LENGTH";
/// Environment variable for the key returned for absent events.
pub const ENV_TRIVIAL_KEY: &str = "DPK_TRIVIAL_KEY";
/// Environment variable selecting the canonical JSON form (`json` or `jcs`).
pub const ENV_CANONICALIZER: &str = "DPK_CANONICALIZER";

/// Resolved configuration for the `dpk` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Deriver settings.
    pub deriver: DeriverConfig,
    /// Canonical form used for hashing.
    pub canonical_form: CanonicalForm,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DPK_MAX_KEY_LENGTH` (default: 256)
    /// - `DPK_TRIVIAL_KEY` (default: `0`)
    /// - `DPK_CANONICALIZER` (default: `json`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_KEY_LENGTH) {
            config.deriver.max_key_length =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: ENV_MAX_KEY_LENGTH.to_string(),
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = lookup(ENV_TRIVIAL_KEY) {
            config.deriver.trivial_key = raw;
        }
        if let Some(raw) = lookup(ENV_CANONICALIZER) {
            config.canonical_form = raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_CANONICALIZER.to_string(),
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        max_key_length: Option<usize>,
        trivial_key: Option<String>,
        canonical_form: Option<CanonicalForm>,
    ) -> Self {
        if let Some(max) = max_key_length {
            self.deriver.max_key_length = max;
        }
        if let Some(key) = trivial_key {
            self.deriver.trivial_key = key;
        }
        if let Some(form) = canonical_form {
            self.canonical_form = form;
        }
        self
    }

    /// Build a validated deriver.
    pub fn build_deriver(&self) -> Result<KeyDeriver<CanonicalForm>, DpkError> {
        KeyDeriver::with_config(self.deriver.clone(), self.canonical_form)
    }
}
