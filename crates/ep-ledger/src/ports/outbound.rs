//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the ledger requires the host application to implement:
//! durable storage for the serialized chain blob, and a clock.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{StoreError, Timestamp};

/// Durable storage for the persisted chain blob.
///
/// The chain is stored as a single versioned document; every sanctioned
/// append rewrites it. Loading an absent blob yields `None`, which callers
/// turn into a fresh genesis-only chain.
///
/// Production: the primary store's chain table.
/// Testing: [`InMemoryChainStore`] (below).
pub trait ChainStore: Send + Sync {
    /// Persist the serialized chain, replacing any previous version.
    fn save(&self, blob: &str) -> Result<(), StoreError>;

    /// Load the last-persisted chain, or `None` if never saved.
    fn load(&self) -> Result<Option<String>, StoreError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// In-memory chain store for unit tests.
///
/// Cloning yields a shared handle over the same blob, so a ledger service
/// and an integrity check can observe each other's writes the way two
/// processes would through the real store.
#[derive(Clone, Default)]
pub struct InMemoryChainStore {
    blob: Arc<Mutex<Option<String>>>,
}

impl InMemoryChainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the raw blob, bypassing the trait (test inspection).
    pub fn raw_blob(&self) -> Option<String> {
        self.blob.lock().clone()
    }

    /// Overwrite the raw blob, bypassing the trait (simulates out-of-band
    /// edits to the persisted chain itself).
    pub fn overwrite_blob(&self, blob: String) {
        *self.blob.lock() = Some(blob);
    }
}

impl ChainStore for InMemoryChainStore {
    fn save(&self, blob: &str) -> Result<(), StoreError> {
        *self.blob.lock() = Some(blob.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.lock().clone())
    }
}

/// Time source returning a fixed, manually advanced timestamp.
#[derive(Clone, Default)]
pub struct FixedTimeSource {
    now: Arc<Mutex<Timestamp>>,
}

impl FixedTimeSource {
    pub fn at(now: Timestamp) -> Self {
        FixedTimeSource {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, seconds: u64) {
        *self.now.lock() += seconds;
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}
