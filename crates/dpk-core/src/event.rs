//! # Events
//!
//! An event is any JSON value, or nothing at all. No schema is enforced; the
//! deriver only asks one question of it, via [`Event::explicit_key`].

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Name of the field that carries an explicit partition key.
pub const PARTITION_KEY_FIELD: &str = "partitionKey";

/// An input event.
///
/// A JSON `null` is never stored as `Present`; every constructor collapses it
/// to `Absent`, so a missing event and an explicit null are indistinguishable.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Event {
    /// No event was supplied.
    #[default]
    Absent,
    /// Any non-null JSON value.
    Present(Value),
}

impl Event {
    /// Wrap a JSON value, collapsing `null` to `Absent`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            other => Self::Present(other),
        }
    }

    /// Convert any serializable value into an event.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` when the value has
    /// no JSON representation (for example a map with non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, CanonicalizationError> {
        Ok(Self::from_value(serde_json::to_value(value)?))
    }

    /// Returns true if no event was supplied.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The explicit partition key, if the event carries one.
    ///
    /// Only an object can carry a key. A missing field and a `null` field are
    /// both treated as "no key"; every other value, including `false`, `0` and
    /// `""`, counts as present.
    pub fn explicit_key(&self) -> Option<&Value> {
        match self {
            Self::Present(Value::Object(map)) => {
                map.get(PARTITION_KEY_FIELD).filter(|v| !v.is_null())
            }
            _ => None,
        }
    }
}

impl From<Value> for Event {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<Option<Value>> for Event {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Absent, Self::from_value)
    }
}
