//! # Error Types
//!
//! Key derivation has exactly one runtime failure class: the canonical JSON
//! step cannot represent the event. Configuration errors are reported
//! separately so a misconfigured deriver is rejected before any event is seen.

use thiserror::Error;

/// Top-level error type for partition key derivation.
#[derive(Error, Debug)]
pub enum DpkError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The deriver configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed, e.g. a map keyed by a non-string type.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Invalid deriver configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The explicit-key length threshold must be at least one code unit.
    #[error("max key length must be greater than zero")]
    ZeroMaxKeyLength,

    /// The key returned for absent events must not be empty.
    #[error("trivial key must not be empty")]
    EmptyTrivialKey,

    /// The trivial key must itself fit within the length threshold.
    #[error("trivial key is {len} code units, exceeding max key length {max}")]
    TrivialKeyTooLong {
        /// Length of the trivial key in UTF-16 code units.
        len: usize,
        /// Configured threshold.
        max: usize,
    },

    /// A configuration value could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// The setting (or environment variable) that was rejected.
        var: String,
        /// The raw value supplied.
        value: String,
    },
}
