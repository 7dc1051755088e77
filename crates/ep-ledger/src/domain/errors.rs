//! # Ledger Domain Errors

use thiserror::Error;

/// Errors that can occur while building or decoding the chain.
///
/// Link and data divergences are NOT errors: they are reported through
/// [`crate::LinkReport`] and the reconciliation report, never raised.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A record's action payload could not be canonically encoded.
    #[error("record payload could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    /// A persisted chain blob could not be decoded.
    #[error("chain blob could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// A persisted chain blob held no records at all.
    ///
    /// A valid blob always starts with the genesis record; an empty list
    /// means the blob itself was damaged or truncated.
    #[error("chain blob contains no records")]
    EmptyChain,
}
