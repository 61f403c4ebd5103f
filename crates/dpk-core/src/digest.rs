//! # Content Digest
//!
//! SHA3-512 digests used whenever a partition key has to be derived from
//! content rather than taken verbatim. Digests render as 128 lowercase hex
//! characters.

use sha3::{Digest, Sha3_512};

use crate::canonical::CanonicalBytes;

/// Length of a SHA3-512 digest in bytes.
pub const DIGEST_LEN: usize = 64;

/// Length of a hex-rendered SHA3-512 digest in characters.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// A SHA3-512 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; DIGEST_LEN]);

impl ContentDigest {
    /// Digest of a canonicalized event.
    pub fn from_canonical(data: &CanonicalBytes) -> Self {
        sha3_512_digest(data.as_bytes())
    }

    /// The raw 64-byte digest value.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Compute the SHA3-512 digest of raw bytes.
///
/// Used directly for oversized explicit keys, which are hashed as their UTF-8
/// bytes without any JSON encoding.
pub fn sha3_512_digest(data: &[u8]) -> ContentDigest {
    let hash = Sha3_512::digest(data);
    let mut bytes = [0u8; DIGEST_LEN];
    bytes.copy_from_slice(&hash);
    ContentDigest(bytes)
}

/// Compute a SHA3-512 hex string from raw bytes.
pub fn sha3_512_hex(data: &[u8]) -> String {
    sha3_512_digest(data).to_hex()
}
