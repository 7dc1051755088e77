//! # The Chain
//!
//! Ordered append-only sequence of records, seeded with a fixed genesis
//! record. Owns append, link-integrity verification, and the JSON
//! round-trip used for persistence.

use serde::{Deserialize, Serialize};
use shared_types::{Digest, Timestamp};

use super::action::Action;
use super::errors::LedgerError;
use super::record::Record;

/// The append-only hash-linked ledger.
///
/// Index 0 is always genesis. Grows monotonically via [`Chain::append`]; may
/// be wholly replaced by [`Chain::from_json`], which trusts stored digests
/// as given so that a later [`Chain::verify_links`] is a genuine tamper
/// check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain {
    records: Vec<Record>,
}

/// Outcome of a link-integrity pass.
///
/// Fail-fast: only the first break is reported; later breaks are shadowed
/// until the first is resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkReport {
    pub valid: bool,
    pub break_index: Option<u64>,
    pub message: String,
}

impl LinkReport {
    fn intact() -> LinkReport {
        LinkReport {
            valid: true,
            break_index: None,
            message: "chain is valid and intact".into(),
        }
    }

    fn broken(index: u64, message: String) -> LinkReport {
        LinkReport {
            valid: false,
            break_index: Some(index),
            message,
        }
    }
}

impl Chain {
    /// Create a fresh chain holding only the genesis record.
    pub fn new(created_at: Timestamp) -> Result<Chain, LedgerError> {
        Ok(Chain {
            records: vec![Record::genesis(created_at)?],
        })
    }

    /// Append a new record: `sequence = last + 1`, `prev_digest =
    /// last.digest`. In-memory only; the caller persists the updated chain.
    pub fn append(&mut self, action: Action, created_at: Timestamp) -> Result<Record, LedgerError> {
        let last = self.records.last().ok_or(LedgerError::EmptyChain)?;
        let record = Record::seal(last.sequence + 1, created_at, action, last.digest)?;
        self.records.push(record.clone());
        Ok(record)
    }

    /// Drop the newest record, rolling back an append whose persist step
    /// failed. The genesis record is never dropped.
    pub(crate) fn drop_latest(&mut self) {
        if self.records.len() > 1 {
            self.records.pop();
        }
    }

    /// The most recent record.
    pub fn latest(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in chain order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The last `count` records, in chain order.
    pub fn recent(&self, count: usize) -> &[Record] {
        let start = self.records.len().saturating_sub(count);
        &self.records[start..]
    }

    /// All records referencing the given evidence id, lazily, in chain
    /// order.
    pub fn entries_for<'a>(&'a self, evidence_id: &'a str) -> impl Iterator<Item = &'a Record> {
        self.records
            .iter()
            .filter(move |r| r.action.evidence_id() == Some(evidence_id))
    }

    /// Verify every link in the chain, stopping at the first break.
    ///
    /// For each record after genesis:
    /// 1. recompute its digest and compare to the stored value (catches
    ///    payload tampering within the record),
    /// 2. compare its `prev_digest` to the prior record's stored digest
    ///    (catches reordering, deletion, and insertion),
    /// 3. check the sequence number is contiguous (pins the exact index of
    ///    a mid-chain deletion).
    pub fn verify_links(&self) -> LinkReport {
        for i in 1..self.records.len() {
            let current = &self.records[i];
            let previous = &self.records[i - 1];
            let index = i as u64;

            match current.computed_digest() {
                Ok(computed) if computed != current.digest => {
                    return LinkReport::broken(
                        index,
                        format!("record {index} has been tampered with (digest mismatch)"),
                    );
                }
                Err(e) => {
                    return LinkReport::broken(
                        index,
                        format!("record {index} could not be re-encoded for verification: {e}"),
                    );
                }
                Ok(_) => {}
            }

            if current.prev_digest != previous.digest {
                return LinkReport::broken(
                    index,
                    format!("record {index} has a broken chain link (prev_digest mismatch)"),
                );
            }

            if current.sequence != previous.sequence + 1 {
                return LinkReport::broken(
                    index,
                    format!(
                        "record {index} has a sequence gap ({} follows {})",
                        current.sequence, previous.sequence
                    ),
                );
            }
        }
        LinkReport::intact()
    }

    /// Serialize the full chain, stored digests included, as the persisted
    /// blob.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        serde_json::to_string_pretty(&self.records).map_err(LedgerError::Encode)
    }

    /// Rebuild a chain from a persisted blob.
    ///
    /// Stored digests are trusted as given and NOT recomputed; recomputation
    /// happens only in [`Chain::verify_links`]. Recomputing here would make
    /// injected tampering undetectable.
    pub fn from_json(blob: &str) -> Result<Chain, LedgerError> {
        let records: Vec<Record> = serde_json::from_str(blob).map_err(LedgerError::Decode)?;
        if records.is_empty() {
            return Err(LedgerError::EmptyChain);
        }
        Ok(Chain { records })
    }
}
