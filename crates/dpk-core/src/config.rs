//! Deriver configuration.
//!
//! The defaults reproduce the reference behaviour exactly. Overrides exist
//! for deployments whose downstream partitioner accepts shorter or longer
//! keys; the library itself never reads the environment.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::partition_key::code_units;

/// Default explicit-key threshold, in UTF-16 code units.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 256;

/// Default key for absent events.
pub const DEFAULT_TRIVIAL_KEY: &str = "0";

/// Settings for a [`KeyDeriver`](crate::KeyDeriver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriverConfig {
    /// Explicit keys longer than this many UTF-16 code units are hashed.
    pub max_key_length: usize,
    /// Key returned for an absent event.
    pub trivial_key: String,
}

impl Default for DeriverConfig {
    fn default() -> Self {
        Self {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            trivial_key: DEFAULT_TRIVIAL_KEY.to_string(),
        }
    }
}

impl DeriverConfig {
    /// Check the configuration's invariants.
    ///
    /// # Errors
    ///
    /// - `ZeroMaxKeyLength` if `max_key_length` is zero.
    /// - `EmptyTrivialKey` if `trivial_key` is empty.
    /// - `TrivialKeyTooLong` if `trivial_key` exceeds `max_key_length`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_key_length == 0 {
            return Err(ConfigError::ZeroMaxKeyLength);
        }
        if self.trivial_key.is_empty() {
            return Err(ConfigError::EmptyTrivialKey);
        }
        let len = code_units(&self.trivial_key);
        if len > self.max_key_length {
            return Err(ConfigError::TrivialKeyTooLong {
                len,
                max: self.max_key_length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = DeriverConfig::default();
        assert_eq!(config.max_key_length, 256);
        assert_eq!(config.trivial_key, "0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_threshold_rejected() {
        let config = DeriverConfig {
            max_key_length: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxKeyLength));
    }

    #[test]
    fn empty_trivial_key_rejected() {
        let config = DeriverConfig {
            trivial_key: String::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyTrivialKey));
    }

    #[test]
    fn trivial_key_longer_than_threshold_rejected() {
        let config = DeriverConfig {
            max_key_length: 2,
            trivial_key: "abc".to_string(),
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TrivialKeyTooLong { len: 3, max: 2 })
        );
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: DeriverConfig = serde_json::from_str(r#"{"max_key_length": 64}"#).unwrap();
        assert_eq!(config.max_key_length, 64);
        assert_eq!(config.trivial_key, "0");
    }
}
