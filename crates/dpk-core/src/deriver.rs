//! # Key Deriver
//!
//! Derives a partition key from an event, in strict order:
//!
//! 1. Absent event → the trivial key (`"0"`).
//! 2. No explicit `partitionKey` → SHA3-512 hex of the canonical JSON of the
//!    whole event.
//! 3. Explicit key → the key itself if it is a JSON string, otherwise its
//!    canonical JSON text. Candidates longer than the threshold (256 UTF-16
//!    code units) are replaced by the SHA3-512 hex of their UTF-8 bytes.
//!
//! Derivation is pure. A `KeyDeriver` holds only immutable configuration and
//! can be shared across threads.

use serde::Serialize;
use serde_json::Value;

use crate::canonical::{CanonicalBytes, Canonicalizer, JsonText};
use crate::config::DeriverConfig;
use crate::digest::{sha3_512_hex, ContentDigest};
use crate::error::DpkError;
use crate::event::Event;
use crate::partition_key::{code_units, KeySource, PartitionKey};

/// Derives partition keys using canonicalizer `C`.
#[derive(Debug, Clone)]
pub struct KeyDeriver<C = JsonText> {
    config: DeriverConfig,
    canonicalizer: C,
}

impl Default for KeyDeriver<JsonText> {
    fn default() -> Self {
        Self {
            config: DeriverConfig::default(),
            canonicalizer: JsonText,
        }
    }
}

impl KeyDeriver<JsonText> {
    /// A deriver with the default configuration and `JsonText` canonicalization.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Canonicalizer> KeyDeriver<C> {
    /// Build a deriver from a configuration and canonicalizer.
    ///
    /// # Errors
    ///
    /// Returns `DpkError::Config` if the configuration is invalid.
    pub fn with_config(config: DeriverConfig, canonicalizer: C) -> Result<Self, DpkError> {
        config.validate()?;
        Ok(Self {
            config,
            canonicalizer,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &DeriverConfig {
        &self.config
    }

    /// The active canonicalizer.
    pub fn canonicalizer(&self) -> &C {
        &self.canonicalizer
    }

    /// Derive the partition key for `event`.
    ///
    /// # Errors
    ///
    /// Returns `DpkError::Canonicalization` if the canonical JSON step fails.
    pub fn derive(&self, event: &Event) -> Result<PartitionKey, DpkError> {
        let value = match event {
            Event::Absent => {
                tracing::trace!(source = %KeySource::Trivial, "absent event");
                return Ok(PartitionKey::new(
                    self.config.trivial_key.clone(),
                    KeySource::Trivial,
                ));
            }
            Event::Present(value) => value,
        };

        let Some(explicit) = event.explicit_key() else {
            let canonical = CanonicalBytes::new(value, &self.canonicalizer)?;
            tracing::trace!(
                source = %KeySource::HashedEvent,
                canonical_len = canonical.len(),
                "no explicit key; hashing event"
            );
            let digest = ContentDigest::from_canonical(&canonical);
            return Ok(PartitionKey::new(digest.to_hex(), KeySource::HashedEvent));
        };

        let candidate = match explicit {
            Value::String(s) => s.clone(),
            other => self.canonicalizer.canonicalize(other)?,
        };

        let len = code_units(&candidate);
        if len > self.config.max_key_length {
            tracing::trace!(
                source = %KeySource::HashedExplicit,
                len,
                max = self.config.max_key_length,
                "explicit key too long; hashing"
            );
            Ok(PartitionKey::new(
                sha3_512_hex(candidate.as_bytes()),
                KeySource::HashedExplicit,
            ))
        } else {
            tracing::trace!(source = %KeySource::Explicit, len, "explicit key");
            Ok(PartitionKey::new(candidate, KeySource::Explicit))
        }
    }

    /// Derive the partition key for an optional JSON value.
    ///
    /// `None` and `Some(&Value::Null)` both yield the trivial key.
    pub fn derive_value(&self, event: Option<&Value>) -> Result<PartitionKey, DpkError> {
        self.derive(&Event::from(event.cloned()))
    }

    /// Derive the partition key for any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `DpkError::Canonicalization` if `event` has no JSON
    /// representation.
    pub fn derive_serialize<T>(&self, event: Option<&T>) -> Result<PartitionKey, DpkError>
    where
        T: Serialize + ?Sized,
    {
        let event = match event {
            Some(v) => Event::from_serialize(v)?,
            None => Event::Absent,
        };
        self.derive(&event)
    }
}

/// Derive a partition key with the default configuration.
///
/// Equivalent to `KeyDeriver::new().derive_value(event)`.
pub fn deterministic_partition_key(event: Option<&Value>) -> Result<PartitionKey, DpkError> {
    KeyDeriver::new().derive_value(event)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::digest::DIGEST_HEX_LEN;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        /// Short string keys are returned verbatim.
        #[test]
        fn short_keys_verbatim(key in "\\PC{0,256}") {
            prop_assume!(code_units(&key) <= 256);
            let out = KeyDeriver::new()
                .derive_value(Some(&json!({"partitionKey": key.clone()})))
                .unwrap();
            prop_assert_eq!(out.as_str(), key.as_str());
        }

        /// Long string keys always become a fixed-length lowercase digest.
        #[test]
        fn long_keys_hashed(key in "[a-z0-9]{257,600}") {
            let out = KeyDeriver::new()
                .derive_value(Some(&json!({"partitionKey": key})))
                .unwrap();
            prop_assert_eq!(out.as_str().len(), DIGEST_HEX_LEN);
            prop_assert!(out.as_str().chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }

        /// Events without an explicit key hash deterministically.
        #[test]
        fn keyless_events_deterministic(foo in any::<i64>(), bar in "[a-z]{0,20}") {
            let event = json!({"foo": foo, "bar": bar});
            let a = deterministic_partition_key(Some(&event)).unwrap();
            let b = deterministic_partition_key(Some(&event)).unwrap();
            prop_assert_eq!(a.source(), KeySource::HashedEvent);
            prop_assert_eq!(a, b);
        }
    }
}
