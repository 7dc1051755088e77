//! # Reconciliation Engine (ep-reconcile)
//!
//! Replays the chain to derive the expected current state of every tracked
//! entity, then diffs that projection against what the primary store
//! actually holds. The result distinguishes three outcomes per entity:
//!
//! - **never tracked** by the ledger: skipped (predates ledger tracking)
//! - **matches** its projection: pass
//! - **diverges**: flagged, with the diverging fields and both values
//!
//! ## Flow
//!
//! ```text
//! chain ──replay──→ projected state ─┐
//!                                    ├──diff──→ tamper report
//! store ──snapshot─→ current rows  ──┘
//! ```
//!
//! One generic replay+diff routine ([`domain::projection`]) is parameterized
//! by per-entity-type [`ReplayRules`] (evidence, users, custody logs) rather
//! than duplicating the control flow per type.
//!
//! [`IntegrityService`] is the single entry point callers use to ask "is
//! everything still correct?": reload chain → verify links → reconcile →
//! merged [`IntegrityReport`].

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::projection::{diff_snapshot, project, reconcile_type, Projected, ReplayRules};
pub use domain::report::{
    DataReport, Divergence, EntityKind, IntegrityReport, TamperKind, TamperedEntity,
};
pub use domain::rules::{CustodyLogRules, EvidenceRules, UserRules};
pub use ports::outbound::{EntitySnapshots, InMemoryStore};
pub use service::{IntegrityError, IntegrityService, LedgerStats};
