//! # Shared Types
//!
//! Domain entities and digest primitives for the Evidence Protection Ledger.
//!
//! ## Clusters
//!
//! - **Digests**: [`Digest`], the SHA-256 fingerprint used for both chain
//!   linkage and entity content commitments
//! - **Actors**: [`Actor`], [`ActorRole`], who performed a ledger action
//! - **Entities**: [`EvidenceItem`], [`UserAccount`], [`CustodyLog`], the
//!   tracked rows of the primary store, each with a canonical field set
//! - **Change maps**: [`EvidenceChanges`], [`UserChanges`], sparse update
//!   payloads that overlay onto a creation snapshot
//!
//! The canonical field sets and content digests here are shared by both the
//! reconciliation engine and the store-side write path, so projected and
//! current state digest to directly comparable values.

pub mod digest;
pub mod entities;
pub mod errors;

pub use digest::Digest;
pub use entities::{
    Actor, ActorRole, CustodyLog, EvidenceChanges, EvidenceItem, UserAccount, UserChanges,
    EVIDENCE_FIELDS, USER_FIELDS,
};
pub use errors::StoreError;

/// Unix timestamp in seconds.
pub type Timestamp = u64;
