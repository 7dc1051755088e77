//! # Shared Error Types

use thiserror::Error;

/// Failure talking to the primary store (a collaborator, not the ledger).
///
/// Reconciliation catches these and surfaces them as non-fatal failure
/// messages in the report rather than propagating.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A snapshot or chain-blob read failed.
    #[error("store read failed: {0}")]
    ReadFailed(String),

    /// Persisting the chain blob or a row failed.
    #[error("store write failed: {0}")]
    WriteFailed(String),
}
