//! # Chain Records
//!
//! One immutable unit of the chain: sequence position, creation time, typed
//! action, link to the prior record's digest, and its own sealed digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use shared_types::{Digest, Timestamp};

use super::action::Action;
use super::errors::LedgerError;

/// An immutable entry in the chain.
///
/// The digest commits to `{sequence, created_at, action, prev_digest}` via a
/// canonical encoding, so the same logical content always seals to the same
/// digest. `created_at` is informational only; it participates in the digest
/// but carries no ordering guarantee beyond that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Position in the chain, strictly increasing by 1 from 0.
    pub sequence: u64,
    /// Unix seconds at append time.
    pub created_at: Timestamp,
    /// The domain action this record witnesses.
    pub action: Action,
    /// Digest of the immediately preceding record
    /// ([`Digest::ZERO`] for genesis).
    pub prev_digest: Digest,
    /// This record's own sealed digest.
    ///
    /// Trusted as stored on deserialization; recomputed only during
    /// verification.
    pub digest: Digest,
}

impl Record {
    /// Build and seal a record, computing its digest.
    pub fn seal(
        sequence: u64,
        created_at: Timestamp,
        action: Action,
        prev_digest: Digest,
    ) -> Result<Record, LedgerError> {
        let digest = digest_of(sequence, created_at, &action, &prev_digest)?;
        Ok(Record {
            sequence,
            created_at,
            action,
            prev_digest,
            digest,
        })
    }

    /// The fixed first record of every chain.
    pub fn genesis(created_at: Timestamp) -> Result<Record, LedgerError> {
        Record::seal(0, created_at, Action::genesis(), Digest::ZERO)
    }

    /// Recompute this record's digest from its own fields.
    ///
    /// Differs from the stored `digest` exactly when the record's content
    /// was altered after sealing.
    pub fn computed_digest(&self) -> Result<Digest, LedgerError> {
        digest_of(self.sequence, self.created_at, &self.action, &self.prev_digest)
    }
}

/// Canonical digest input: sequence and timestamp as little-endian bytes,
/// the action as canonical JSON, then the previous digest, fed into the
/// hasher in that fixed order.
fn digest_of(
    sequence: u64,
    created_at: Timestamp,
    action: &Action,
    prev_digest: &Digest,
) -> Result<Digest, LedgerError> {
    let payload = serde_json::to_vec(action).map_err(LedgerError::Encode)?;

    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(created_at.to_le_bytes());
    hasher.update(&payload);
    hasher.update(prev_digest.as_bytes());
    Ok(Digest(hasher.finalize().into()))
}
