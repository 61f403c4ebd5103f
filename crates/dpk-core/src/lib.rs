//! # dpk-core: Deterministic Partition Keys
//!
//! Computes a stable partition key for an arbitrary event so that the event
//! can be routed to a fixed downstream partition. Routing itself is out of
//! scope; this crate only produces the key.
//!
//! ```
//! use dpk_core::deterministic_partition_key;
//! use serde_json::json;
//!
//! let key = deterministic_partition_key(Some(&json!({"partitionKey": "my-key"})))?;
//! assert_eq!(key, "my-key");
//!
//! let key = deterministic_partition_key(None)?;
//! assert_eq!(key, "0");
//! # Ok::<(), dpk_core::DpkError>(())
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **`Event` makes absence explicit.** A missing event and a JSON `null`
//!    collapse to `Event::Absent` at construction, so the deriver never has
//!    to tell them apart.
//!
//! 2. **`CanonicalBytes` newtype.** Whole-event hashing accepts only
//!    `CanonicalBytes`, and the only way to make one is through a
//!    `Canonicalizer`. JSON formatting is delegated to `serde_json` (or
//!    `serde_jcs`), never re-implemented here.
//!
//! 3. **Thresholds in UTF-16 code units.** Explicit keys are measured the way
//!    the producers that write them measure string length.
//!
//! ## Crate Policy
//!
//! - No I/O, no global state, no environment access.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod config;
pub mod deriver;
pub mod digest;
pub mod error;
pub mod event;
pub mod partition_key;

// Re-export primary types for ergonomic imports.
pub use canonical::{CanonicalBytes, CanonicalForm, Canonicalizer, Jcs, JsonText};
pub use config::{DeriverConfig, DEFAULT_MAX_KEY_LENGTH, DEFAULT_TRIVIAL_KEY};
pub use deriver::{deterministic_partition_key, KeyDeriver};
pub use digest::{sha3_512_digest, sha3_512_hex, ContentDigest, DIGEST_HEX_LEN};
pub use error::{CanonicalizationError, ConfigError, DpkError};
pub use event::{Event, PARTITION_KEY_FIELD};
pub use partition_key::{code_units, KeySource, PartitionKey};
