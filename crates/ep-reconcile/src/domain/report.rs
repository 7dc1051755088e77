//! # Tamper Reports
//!
//! The structured verdicts produced by reconciliation. Reports are
//! regenerated on every request and never persisted.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Which tracked table an entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Evidence,
    User,
    CustodyLog,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Evidence => "evidence",
            EntityKind::User => "user",
            EntityKind::CustodyLog => "custody_log",
        };
        write!(f, "{name}")
    }
}

/// One diverging field: what the store holds now versus what the chain
/// projection says it should hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Divergence {
    pub field: String,
    pub current: Value,
    pub expected: Value,
}

/// Category of a tamper finding, roughly in ascending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TamperKind {
    /// Canonical field values diverge from the projection.
    FieldMismatch,
    /// Entity was deactivated/reactivated (or resurrected) outside the
    /// sanctioned path.
    LivenessFlipped,
    /// A username the ledger recorded under one id now lives under another.
    IdRemapped,
    /// A credential hash changed with no ledger record of it.
    CredentialDrift,
    /// The ledger recorded creations for this type but the store holds
    /// nothing: total data loss, not a partial edit.
    StoreWiped,
}

/// One flagged entity, with the enumerated field divergences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TamperedEntity {
    pub entity: EntityKind,
    pub entity_id: String,
    pub kind: TamperKind,
    pub fields: Vec<Divergence>,
}

/// Verdict of the data-reconciliation half of an integrity check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataReport {
    /// True iff no tampered entries across any tracked entity type.
    pub valid: bool,
    pub tampered: Vec<TamperedEntity>,
    /// Non-fatal collaborator failures (a snapshot that could not be read).
    /// Other entity types still reconcile.
    pub failures: Vec<String>,
    pub message: String,
}

/// The consolidated verdict returned by the integrity façade.
///
/// `chain_valid` and `tampered` are surfaced separately so a caller can
/// distinguish "the ledger itself was doctored" from "the store was edited
/// behind the ledger's back".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityReport {
    /// `chain_valid && data_valid`.
    pub valid: bool,
    pub chain_valid: bool,
    pub chain_break_index: Option<u64>,
    pub chain_message: String,
    pub data_valid: bool,
    pub data_message: String,
    pub tampered: Vec<TamperedEntity>,
    pub failures: Vec<String>,
}
