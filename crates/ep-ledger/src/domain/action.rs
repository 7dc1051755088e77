//! # Ledger Actions
//!
//! The typed payload of a chain record: one closed variant per action kind,
//! each carrying the acting user and exactly the fields that action needs.
//! Unknown or extra fields in a persisted payload are a deserialization
//! error, never silently ignored.

use serde::{Deserialize, Serialize};
use shared_types::{
    Actor, CustodyLog, EvidenceChanges, EvidenceItem, UserAccount, UserChanges,
};

/// A tagged domain action recorded on the chain.
///
/// Serializes as `{"action": "<kind>", "details": {...}}`, the shape of the
/// persisted chain blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "details", rename_all = "snake_case")]
pub enum Action {
    Genesis(Genesis),
    CreateUser(CreateUser),
    UpdateUser(UpdateUser),
    DeleteUser(DeleteUser),
    CreateEvidence(CreateEvidence),
    UpdateEvidence(UpdateEvidence),
    DeleteEvidence(DeleteEvidence),
    CreateCustodyLog(CreateCustodyLog),
}

/// Chain initialization marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Genesis {
    pub actor: Actor,
    pub message: String,
}

/// A new user account, with its full creation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUser {
    pub actor: Actor,
    pub user: UserAccount,
}

/// A sparse update to an existing user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUser {
    pub actor: Actor,
    pub user_id: i64,
    pub changes: UserChanges,
}

/// Soft deletion of a user account (row stays, `is_active` flips).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteUser {
    pub actor: Actor,
    pub user_id: i64,
    pub username: String,
}

/// A new evidence item, with its full creation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEvidence {
    pub actor: Actor,
    pub evidence: EvidenceItem,
}

/// A sparse update to an existing evidence item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEvidence {
    pub actor: Actor,
    pub evidence_id: String,
    pub changes: EvidenceChanges,
}

/// Soft deletion of an evidence item (status flips to `"deleted"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteEvidence {
    pub actor: Actor,
    pub evidence_id: String,
    pub description: String,
}

/// A new custody/movement log entry. Logs are create-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCustodyLog {
    pub actor: Actor,
    pub log: CustodyLog,
}

impl Action {
    /// Standard genesis action.
    pub fn genesis() -> Action {
        Action::Genesis(Genesis {
            actor: Actor::system(),
            message: "Evidence Protection System Initialized".into(),
        })
    }

    /// Snake_case action name, matching the serialized tag.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Genesis(_) => "genesis",
            Action::CreateUser(_) => "create_user",
            Action::UpdateUser(_) => "update_user",
            Action::DeleteUser(_) => "delete_user",
            Action::CreateEvidence(_) => "create_evidence",
            Action::UpdateEvidence(_) => "update_evidence",
            Action::DeleteEvidence(_) => "delete_evidence",
            Action::CreateCustodyLog(_) => "create_custody_log",
        }
    }

    /// The acting user.
    pub fn actor(&self) -> &Actor {
        match self {
            Action::Genesis(a) => &a.actor,
            Action::CreateUser(a) => &a.actor,
            Action::UpdateUser(a) => &a.actor,
            Action::DeleteUser(a) => &a.actor,
            Action::CreateEvidence(a) => &a.actor,
            Action::UpdateEvidence(a) => &a.actor,
            Action::DeleteEvidence(a) => &a.actor,
            Action::CreateCustodyLog(a) => &a.actor,
        }
    }

    /// The evidence id this action references, if any.
    ///
    /// Used by per-entity history lookup; custody log actions reference the
    /// evidence they move, so they show up in that evidence's history.
    pub fn evidence_id(&self) -> Option<&str> {
        match self {
            Action::CreateEvidence(a) => Some(&a.evidence.evidence_id),
            Action::UpdateEvidence(a) => Some(&a.evidence_id),
            Action::DeleteEvidence(a) => Some(&a.evidence_id),
            Action::CreateCustodyLog(a) => Some(&a.log.evidence_id),
            _ => None,
        }
    }
}
