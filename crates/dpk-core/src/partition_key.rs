//! # Partition Keys
//!
//! The output of derivation: a non-empty string tagged with the branch that
//! produced it. The tag never affects the key itself.

use std::fmt;

use serde::Serialize;

/// How a partition key was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// The event was absent; the configured trivial key was returned.
    Trivial,
    /// The event's explicit key fit within the length threshold.
    Explicit,
    /// The event's explicit key exceeded the threshold and was hashed.
    HashedExplicit,
    /// The event carried no explicit key; the whole event was hashed.
    HashedEvent,
}

impl KeySource {
    /// Returns the source identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Explicit => "explicit",
            Self::HashedExplicit => "hashed_explicit",
            Self::HashedEvent => "hashed_event",
        }
    }

    /// Returns true if the key is a SHA3-512 hex digest.
    pub fn is_hashed(&self) -> bool {
        matches!(self, Self::HashedExplicit | Self::HashedEvent)
    }
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived partition key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PartitionKey {
    key: String,
    source: KeySource,
}

impl PartitionKey {
    pub(crate) fn new(key: String, source: KeySource) -> Self {
        Self { key, source }
    }

    /// The key string.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The branch that produced this key.
    pub fn source(&self) -> KeySource {
        self.source
    }

    /// Consume the key, returning the string.
    pub fn into_string(self) -> String {
        self.key
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for PartitionKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl PartialEq<str> for PartitionKey {
    fn eq(&self, other: &str) -> bool {
        self.key == other
    }
}

impl PartialEq<&str> for PartitionKey {
    fn eq(&self, other: &&str) -> bool {
        self.key == *other
    }
}

impl From<PartitionKey> for String {
    fn from(key: PartitionKey) -> Self {
        key.key
    }
}

/// Length of `s` in UTF-16 code units.
///
/// Key length limits are defined in code units, so a character outside the
/// Basic Multilingual Plane counts twice.
pub fn code_units(s: &str) -> usize {
    s.encode_utf16().count()
}
