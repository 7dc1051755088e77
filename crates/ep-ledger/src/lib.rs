//! # Evidence Protection Ledger (ep-ledger)
//!
//! The tamper-evident core: an append-only, hash-linked chain of action
//! records. Every sanctioned mutation of a tracked entity (evidence, user,
//! custody log) appends exactly one [`Record`] committing to the digest of
//! its predecessor, so any later edit, reorder, insertion, or deletion of
//! persisted records is detectable by [`Chain::verify_links`].
//!
//! ## Trust Model
//!
//! ```text
//! append ──→ seal digest ──→ persist blob        (sanctioned write path)
//!                               │
//!                               ▼
//! load blob ──→ digests TRUSTED AS STORED ──→ verify_links recomputes
//! ```
//!
//! Deserialization never recomputes digests. That is deliberate: a doctored
//! blob keeps its doctored digests, and verification then catches either the
//! digest mismatch or the broken `prev_digest` link. Recomputing on load
//! would launder the tampering.
//!
//! ## Crate Structure
//!
//! - `domain/` - Pure chain logic (actions, records, linkage verification)
//! - `ports/` - Outbound traits (chain blob store, time source) + adapters
//! - `service/` - [`LedgerService`], the single-writer append+persist handle

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::action::{
    Action, CreateCustodyLog, CreateEvidence, CreateUser, DeleteEvidence, DeleteUser, Genesis,
    UpdateEvidence, UpdateUser,
};
pub use domain::chain::{Chain, LinkReport};
pub use domain::errors::LedgerError;
pub use domain::record::Record;
pub use ports::outbound::{
    ChainStore, FixedTimeSource, InMemoryChainStore, SystemTimeSource, TimeSource,
};
pub use service::{LedgerService, LedgerServiceError, DEFAULT_RECENT};
