//! # Outbound Ports (Driven Ports)
//!
//! What reconciliation requires from the primary store: a full, ordered
//! snapshot of each tracked entity type, with field names matching the
//! canonical sets used for digesting.

use std::sync::Arc;

use ep_ledger::{Action, ChainStore};
use parking_lot::Mutex;
use shared_types::{CustodyLog, EvidenceItem, StoreError, UserAccount};

use crate::domain::report::EntityKind;

/// Snapshot reads over the tracked entity tables.
///
/// Production: the primary relational store.
/// Testing: [`InMemoryStore`] (below).
pub trait EntitySnapshots: Send + Sync {
    fn evidence(&self) -> Result<Vec<EvidenceItem>, StoreError>;
    fn users(&self) -> Result<Vec<UserAccount>, StoreError>;
    fn custody_logs(&self) -> Result<Vec<CustodyLog>, StoreError>;
}

#[derive(Default)]
struct StoreInner {
    evidence: Vec<EvidenceItem>,
    users: Vec<UserAccount>,
    custody_logs: Vec<CustodyLog>,
    chain_blob: Option<String>,
    failing: Vec<EntityKind>,
}

/// In-memory primary store for tests and demos.
///
/// Cloning yields a shared handle over the same rows and chain blob.
/// Implements both [`EntitySnapshots`] and [`ChainStore`], so one handle can
/// back a ledger service and an integrity service at once.
///
/// [`InMemoryStore::apply`] is the sanctioned write path: it mirrors a
/// ledger action into the rows, keeping the store and the chain in step.
/// The `edit_*`/`remove_*`/`wipe` helpers mutate rows directly, simulating
/// exactly the out-of-band edits reconciliation exists to detect.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a ledger action to the rows (the sanctioned write path).
    pub fn apply(&self, action: &Action) {
        let mut inner = self.inner.lock();
        match action {
            Action::CreateEvidence(p) => inner.evidence.push(p.evidence.clone()),
            Action::UpdateEvidence(p) => {
                if let Some(row) = inner
                    .evidence
                    .iter_mut()
                    .find(|r| r.evidence_id == p.evidence_id)
                {
                    p.changes.apply_to(row);
                }
            }
            Action::DeleteEvidence(p) => {
                if let Some(row) = inner
                    .evidence
                    .iter_mut()
                    .find(|r| r.evidence_id == p.evidence_id)
                {
                    row.status = "deleted".into();
                }
            }
            Action::CreateUser(p) => inner.users.push(p.user.clone()),
            Action::UpdateUser(p) => {
                if let Some(row) = inner.users.iter_mut().find(|r| r.id == p.user_id) {
                    p.changes.apply_to(row);
                }
            }
            Action::DeleteUser(p) => {
                if let Some(row) = inner.users.iter_mut().find(|r| r.id == p.user_id) {
                    row.is_active = false;
                }
            }
            Action::CreateCustodyLog(p) => inner.custody_logs.push(p.log.clone()),
            Action::Genesis(_) => {}
        }
    }

    /// Mutate an evidence row directly, outside the sanctioned path.
    pub fn edit_evidence(&self, evidence_id: &str, edit: impl FnOnce(&mut EvidenceItem)) -> bool {
        let mut inner = self.inner.lock();
        match inner
            .evidence
            .iter_mut()
            .find(|r| r.evidence_id == evidence_id)
        {
            Some(row) => {
                edit(row);
                true
            }
            None => false,
        }
    }

    /// Mutate a user row directly, outside the sanctioned path.
    pub fn edit_user(&self, id: i64, edit: impl FnOnce(&mut UserAccount)) -> bool {
        let mut inner = self.inner.lock();
        match inner.users.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                edit(row);
                true
            }
            None => false,
        }
    }

    /// Mutate a custody log row directly, outside the sanctioned path.
    pub fn edit_custody_log(&self, log_id: i64, edit: impl FnOnce(&mut CustodyLog)) -> bool {
        let mut inner = self.inner.lock();
        match inner.custody_logs.iter_mut().find(|r| r.log_id == log_id) {
            Some(row) => {
                edit(row);
                true
            }
            None => false,
        }
    }

    /// Physically remove a custody log row.
    pub fn remove_custody_log(&self, log_id: i64) {
        self.inner.lock().custody_logs.retain(|r| r.log_id != log_id);
    }

    /// Physically remove a user row.
    pub fn remove_user(&self, id: i64) {
        self.inner.lock().users.retain(|r| r.id != id);
    }

    /// Drop every row of one entity type (simulated total data loss).
    pub fn wipe(&self, entity: EntityKind) {
        let mut inner = self.inner.lock();
        match entity {
            EntityKind::Evidence => inner.evidence.clear(),
            EntityKind::User => inner.users.clear(),
            EntityKind::CustodyLog => inner.custody_logs.clear(),
        }
    }

    /// Toggle simulated read failures for one entity type.
    pub fn fail_reads(&self, entity: EntityKind, failing: bool) {
        let mut inner = self.inner.lock();
        inner.failing.retain(|k| *k != entity);
        if failing {
            inner.failing.push(entity);
        }
    }

    fn check_readable(&self, entity: EntityKind) -> Result<(), StoreError> {
        if self.inner.lock().failing.contains(&entity) {
            return Err(StoreError::ReadFailed(format!(
                "simulated {entity} table outage"
            )));
        }
        Ok(())
    }
}

impl EntitySnapshots for InMemoryStore {
    fn evidence(&self) -> Result<Vec<EvidenceItem>, StoreError> {
        self.check_readable(EntityKind::Evidence)?;
        Ok(self.inner.lock().evidence.clone())
    }

    fn users(&self) -> Result<Vec<UserAccount>, StoreError> {
        self.check_readable(EntityKind::User)?;
        Ok(self.inner.lock().users.clone())
    }

    fn custody_logs(&self) -> Result<Vec<CustodyLog>, StoreError> {
        self.check_readable(EntityKind::CustodyLog)?;
        Ok(self.inner.lock().custody_logs.clone())
    }
}

impl ChainStore for InMemoryStore {
    fn save(&self, blob: &str) -> Result<(), StoreError> {
        self.inner.lock().chain_blob = Some(blob.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().chain_blob.clone())
    }
}
