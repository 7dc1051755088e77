//! # Core Domain Entities
//!
//! The tracked rows of the primary evidence store, as they appear both in
//! store snapshots and in ledger creation payloads.
//!
//! Each entity type carries a **canonical field set**: the fixed, ordered
//! list of fields that participate in its content digest. The digest is
//! computed identically by the store-side write path and by the
//! reconciliation engine's replay, so a single comparison decides whether a
//! row still matches its ledger-projected state.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::digest::Digest;

/// Role of the acting user (or the system itself, for genesis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    System,
    Admin,
    Forensic,
    Police,
    EvidenceRoom,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActorRole::System => "system",
            ActorRole::Admin => "admin",
            ActorRole::Forensic => "forensic",
            ActorRole::Police => "police",
            ActorRole::EvidenceRoom => "evidence_room",
        };
        write!(f, "{name}")
    }
}

/// Who performed a ledger action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: ActorRole,
    pub user_id: i64,
}

impl Actor {
    /// The system actor used by the genesis record.
    pub fn system() -> Self {
        Actor {
            role: ActorRole::System,
            user_id: 0,
        }
    }
}

// =============================================================================
// EVIDENCE
// =============================================================================

/// Canonical field set for evidence items, in digest order.
pub const EVIDENCE_FIELDS: [&str; 10] = [
    "evidence_id",
    "description",
    "type",
    "date",
    "time",
    "investigating_officer_id",
    "forensic_officer_id",
    "file_path",
    "file_name",
    "status",
];

/// An evidence item row.
///
/// `status` is part of the canonical set: soft deletion flips it to
/// `"deleted"` and folds that into the digest, so a row resurrected outside
/// the sanctioned path no longer matches its projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub evidence_id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub evidence_type: String,
    pub date: String,
    pub time: String,
    pub investigating_officer_id: i64,
    pub forensic_officer_id: i64,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub status: String,
}

impl EvidenceItem {
    /// Canonical (name, value) pairs in [`EVIDENCE_FIELDS`] order.
    pub fn canonical_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("evidence_id", Value::from(self.evidence_id.clone())),
            ("description", Value::from(self.description.clone())),
            ("type", Value::from(self.evidence_type.clone())),
            ("date", Value::from(self.date.clone())),
            ("time", Value::from(self.time.clone())),
            (
                "investigating_officer_id",
                Value::from(self.investigating_officer_id),
            ),
            ("forensic_officer_id", Value::from(self.forensic_officer_id)),
            ("file_path", opt(&self.file_path)),
            ("file_name", opt(&self.file_name)),
            ("status", Value::from(self.status.clone())),
        ]
    }

    /// SHA-256 over the canonical field set.
    pub fn content_digest(&self) -> Digest {
        digest_fields(&self.canonical_fields())
    }

    pub fn live(&self) -> bool {
        self.status != "deleted"
    }
}

/// Sparse update payload for evidence: only present fields overlay the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub evidence_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investigating_officer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forensic_officer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl EvidenceChanges {
    /// Overlay the present fields onto `row`.
    pub fn apply_to(&self, row: &mut EvidenceItem) {
        if let Some(v) = &self.description {
            row.description = v.clone();
        }
        if let Some(v) = &self.evidence_type {
            row.evidence_type = v.clone();
        }
        if let Some(v) = &self.date {
            row.date = v.clone();
        }
        if let Some(v) = &self.time {
            row.time = v.clone();
        }
        if let Some(v) = self.investigating_officer_id {
            row.investigating_officer_id = v;
        }
        if let Some(v) = self.forensic_officer_id {
            row.forensic_officer_id = v;
        }
        if let Some(v) = &self.file_path {
            row.file_path = Some(v.clone());
        }
        if let Some(v) = &self.file_name {
            row.file_name = Some(v.clone());
        }
        if let Some(v) = &self.status {
            row.status = v.clone();
        }
    }
}

// =============================================================================
// USERS
// =============================================================================

/// Canonical field set for user accounts, in digest order.
///
/// `password_hash` is deliberately excluded: credential drift is reported as
/// its own category, separate from profile-field tampering.
pub const USER_FIELDS: [&str; 6] = [
    "username",
    "role",
    "full_name",
    "badge_number",
    "email",
    "is_active",
];

/// A user account row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: ActorRole,
    pub full_name: String,
    pub badge_number: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
}

impl UserAccount {
    /// Canonical (name, value) pairs in [`USER_FIELDS`] order.
    pub fn canonical_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("username", Value::from(self.username.clone())),
            ("role", Value::from(self.role.to_string())),
            ("full_name", Value::from(self.full_name.clone())),
            ("badge_number", opt(&self.badge_number)),
            ("email", opt(&self.email)),
            ("is_active", Value::from(self.is_active)),
        ]
    }

    /// SHA-256 over the canonical field set (credentials excluded).
    pub fn content_digest(&self) -> Digest {
        digest_fields(&self.canonical_fields())
    }
}

/// Sparse update payload for user accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ActorRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// Overlay the present fields onto `row`.
    pub fn apply_to(&self, row: &mut UserAccount) {
        if let Some(v) = &self.full_name {
            row.full_name = v.clone();
        }
        if let Some(v) = &self.badge_number {
            row.badge_number = Some(v.clone());
        }
        if let Some(v) = &self.email {
            row.email = Some(v.clone());
        }
        if let Some(v) = self.role {
            row.role = v;
        }
        if let Some(v) = self.is_active {
            row.is_active = v;
        }
    }
}

// =============================================================================
// CUSTODY LOGS
// =============================================================================

/// A custody/movement log row.
///
/// Custody logs are create-only: once written, every canonical field is
/// expected to stay exactly as the ledger recorded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustodyLog {
    pub log_id: i64,
    pub evidence_id: String,
    pub log_type: String,
    pub item_count: Option<i64>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub officer_id: i64,
}

impl CustodyLog {
    /// Canonical (name, value) pairs in digest order.
    pub fn canonical_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("evidence_id", Value::from(self.evidence_id.clone())),
            ("log_type", Value::from(self.log_type.clone())),
            (
                "item_count",
                self.item_count.map(Value::from).unwrap_or(Value::Null),
            ),
            ("size", opt(&self.size)),
            ("description", opt(&self.description)),
            ("source", opt(&self.source)),
            ("destination", opt(&self.destination)),
            ("officer_id", Value::from(self.officer_id)),
        ]
    }

    /// SHA-256 over the canonical field set.
    pub fn content_digest(&self) -> Digest {
        digest_fields(&self.canonical_fields())
    }
}

// =============================================================================
// CANONICAL DIGEST ENCODING
// =============================================================================

/// Digest a canonical field list: each name and rendered value is fed into
/// the hasher in declared order with explicit separators, so the same logical
/// content always yields the same digest.
pub fn digest_fields(fields: &[(&'static str, Value)]) -> Digest {
    use sha2::{Digest as _, Sha256};

    let mut hasher = Sha256::new();
    for (name, value) in fields {
        hasher.update(name.as_bytes());
        hasher.update(b"=");
        hasher.update(value.to_string().as_bytes());
        hasher.update(b"\n");
    }
    Digest(hasher.finalize().into())
}

fn opt(value: &Option<String>) -> Value {
    value.as_deref().map(Value::from).unwrap_or(Value::Null)
}
