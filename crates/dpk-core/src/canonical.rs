//! # Canonical Serialization
//!
//! This module defines `CanonicalBytes`, the only input accepted by the
//! whole-event hash path, and the `Canonicalizer` capability that produces it.
//!
//! ## Invariant
//!
//! `CanonicalBytes` has a private inner field. The only way to construct it is
//! `CanonicalBytes::new()`, which runs the event through a `Canonicalizer`.
//! Any code that hashes an event therefore hashes canonical text and never
//! an ad-hoc `to_vec()` rendering.
//!
//! ## Forms
//!
//! - [`JsonText`]: compact JSON, object keys in insertion order, numbers
//!   rendered as ECMAScript `Number::toString` renders them (`2.0` → `2`,
//!   `1e21` → `1e+21`, integers beyond 2^53 rounded to the nearest double).
//!   Byte-identical to `JSON.stringify` and the default.
//! - [`Jcs`]: RFC 8785 JSON Canonicalization Scheme (sorted keys, compact
//!   separators) via `serde_jcs`. Two events that differ only in field order
//!   hash identically under this form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CanonicalizationError, ConfigError};

/// A JSON canonicalization capability.
///
/// Implementations must be deterministic: the same `Value` always renders to
/// the same text.
pub trait Canonicalizer: Send + Sync {
    /// Render `value` as canonical JSON text.
    fn canonicalize(&self, value: &Value) -> Result<String, CanonicalizationError>;
}

/// Largest integer a JavaScript number holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Compact JSON with object keys in insertion order and JavaScript number
/// formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonText;

impl Canonicalizer for JsonText {
    fn canonicalize(&self, value: &Value) -> Result<String, CanonicalizationError> {
        let mut out = String::new();
        write_json_text(value, &mut out)?;
        Ok(out)
    }
}

/// Append `value` to `out`. String escaping is delegated to `serde_json`;
/// only number rendering differs from `serde_json::to_string`.
fn write_json_text(value: &Value, out: &mut String) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => {
            out.push_str(&serde_json::to_string(value)?);
        }
        Value::Number(n) => write_number(n, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_text(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_json_text(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_number(n: &serde_json::Number, out: &mut String) {
    let safe_integer = match (n.as_u64(), n.as_i64()) {
        (Some(u), _) => u <= MAX_SAFE_INTEGER,
        (None, Some(i)) => i.unsigned_abs() <= MAX_SAFE_INTEGER,
        (None, None) => false,
    };
    if safe_integer {
        out.push_str(&n.to_string());
        return;
    }
    // Floats, and integers a JavaScript number cannot hold exactly, go
    // through the nearest double.
    match n.as_f64() {
        Some(f) => out.push_str(ryu_js::Buffer::new().format(f)),
        None => out.push_str(&n.to_string()),
    }
}

/// RFC 8785 JSON Canonicalization Scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jcs;

impl Canonicalizer for Jcs {
    fn canonicalize(&self, value: &Value) -> Result<String, CanonicalizationError> {
        Ok(serde_jcs::to_string(value)?)
    }
}

/// Runtime selection between the built-in canonical forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalForm {
    /// See [`JsonText`].
    #[default]
    #[serde(rename = "json")]
    JsonText,
    /// See [`Jcs`].
    Jcs,
}

impl CanonicalForm {
    /// Returns the form identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JsonText => "json",
            Self::Jcs => "jcs",
        }
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalForm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::JsonText),
            "jcs" => Ok(Self::Jcs),
            _ => Err(ConfigError::InvalidValue {
                var: "canonicalizer".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl Canonicalizer for CanonicalForm {
    fn canonicalize(&self, value: &Value) -> Result<String, CanonicalizationError> {
        match self {
            Self::JsonText => JsonText.canonicalize(value),
            Self::Jcs => Jcs.canonicalize(value),
        }
    }
}

/// Bytes produced exclusively by a [`Canonicalizer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize `value` with the given canonicalizer.
    ///
    /// # Errors
    ///
    /// Propagates the canonicalizer's `CanonicalizationError`.
    pub fn new<C>(value: &Value, canonicalizer: &C) -> Result<Self, CanonicalizationError>
    where
        C: Canonicalizer + ?Sized,
    {
        Ok(Self(canonicalizer.canonicalize(value)?.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
