//! # SHA-256 Digests
//!
//! The 32-byte fingerprint used for chain linkage and entity content
//! commitments. Serialized as lowercase hex so persisted chain blobs stay
//! human-inspectable.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use sha2::{Digest as _, Sha256};

/// A 32-byte SHA-256 digest, hex-encoded in serde form.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Digest(#[serde_as(as = "serde_with::hex::Hex")] pub [u8; 32]);

impl Digest {
    /// The reserved sentinel used as `prev_digest` of the genesis record.
    ///
    /// All-zero bytes can never be the SHA-256 of real data, making genesis
    /// detection unambiguous.
    pub const ZERO: Digest = Digest([0u8; 32]);

    /// Digest a sequence of byte slices fed into the hasher in order.
    pub fn of_parts(parts: &[&[u8]]) -> Digest {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Digest(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First four bytes as hex, for log lines.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
