//! # Ledger Service
//!
//! The explicit handle through which every ledger operation flows: one
//! owned, mutex-guarded chain plus the store it persists to. Replaces any
//! notion of an ambient process-wide chain: callers hold this handle and
//! reload-then-operate is a single method on it.

use parking_lot::Mutex;
use shared_types::StoreError;

use crate::domain::action::Action;
use crate::domain::chain::{Chain, LinkReport};
use crate::domain::errors::LedgerError;
use crate::domain::record::Record;
use crate::ports::outbound::{ChainStore, TimeSource};


/// Default record count for recent-history reads.
pub const DEFAULT_RECENT: usize = 10;

/// Errors surfaced by ledger service operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Single-writer handle over the chain.
///
/// Append-then-persist is one logical step executed under one lock hold, so
/// two concurrent domain actions can never interleave their append+persist
/// sequences and silently drop a link.
pub struct LedgerService<CS, TS> {
    store: CS,
    time: TS,
    chain: Mutex<Chain>,
}

impl<CS: ChainStore, TS: TimeSource> LedgerService<CS, TS> {
    /// Open the ledger: load the last-persisted chain, or start a fresh
    /// genesis-only chain if nothing was ever saved.
    pub fn open(store: CS, time: TS) -> Result<Self, LedgerServiceError> {
        let chain = match store.load()? {
            Some(blob) => Chain::from_json(&blob)?,
            None => {
                tracing::info!("[ep-ledger] no persisted chain found, starting from genesis");
                Chain::new(time.now())?
            }
        };
        tracing::debug!("[ep-ledger] opened chain with {} record(s)", chain.len());
        Ok(LedgerService {
            store,
            time,
            chain: Mutex::new(chain),
        })
    }

    /// Append a domain action and persist the updated chain, atomically
    /// with respect to other callers of this handle.
    ///
    /// If persisting fails the append is rolled back before the error is
    /// returned, so the in-memory chain never holds a record the store has
    /// not durably accepted.
    pub fn record(&self, action: Action) -> Result<Record, LedgerServiceError> {
        let mut chain = self.chain.lock();
        let record = chain.append(action, self.time.now())?;
        let persisted = chain
            .to_json()
            .map_err(LedgerServiceError::from)
            .and_then(|blob| self.store.save(&blob).map_err(LedgerServiceError::from));
        if let Err(e) = persisted {
            chain.drop_latest();
            tracing::warn!(
                "[ep-ledger] append of {} rolled back, persist failed: {e}",
                record.action.label(),
            );
            return Err(e);
        }
        tracing::info!(
            "[ep-ledger] recorded {} at sequence {} ({})",
            record.action.label(),
            record.sequence,
            record.digest.short_hex(),
        );
        Ok(record)
    }

    /// A point-in-time copy of the full chain.
    pub fn chain_snapshot(&self) -> Chain {
        self.chain.lock().clone()
    }

    /// The last `count` records, in chain order.
    pub fn recent(&self, count: usize) -> Vec<Record> {
        self.chain.lock().recent(count).to_vec()
    }

    /// Full per-evidence history, in chain order.
    pub fn history_for(&self, evidence_id: &str) -> Vec<Record> {
        self.chain
            .lock()
            .entries_for(evidence_id)
            .cloned()
            .collect()
    }

    /// Number of records currently in the chain.
    pub fn len(&self) -> usize {
        self.chain.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.lock().is_empty()
    }

    /// Re-read the persisted chain, replace the in-memory copy with it, and
    /// verify its links.
    ///
    /// Always reloads rather than trusting the in-memory chain, so
    /// out-of-band edits to the persisted blob are caught without a process
    /// restart.
    pub fn reload_and_verify(&self) -> Result<LinkReport, LedgerServiceError> {
        let fresh = match self.store.load()? {
            Some(blob) => Chain::from_json(&blob)?,
            None => Chain::new(self.time.now())?,
        };
        let report = fresh.verify_links();
        if !report.valid {
            tracing::warn!(
                "[ep-ledger] link verification failed at index {:?}: {}",
                report.break_index,
                report.message,
            );
        }
        *self.chain.lock() = fresh;
        Ok(report)
    }
}
