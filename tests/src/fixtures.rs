//! # Shared Test Fixtures
//!
//! Entity builders and the two-service "world": a ledger service and an
//! integrity service sharing one in-memory store handle, mirroring how an
//! API process and an audit endpoint share the primary store.

use ep_ledger::{Action, CreateCustodyLog, CreateEvidence, CreateUser, FixedTimeSource, LedgerService};
use ep_reconcile::{InMemoryStore, IntegrityService};
use shared_types::{Actor, ActorRole, CustodyLog, EvidenceItem, UserAccount};

pub type Ledger = LedgerService<InMemoryStore, FixedTimeSource>;
pub type Integrity = IntegrityService<InMemoryStore, InMemoryStore, FixedTimeSource>;

pub fn admin() -> Actor {
    Actor {
        role: ActorRole::Admin,
        user_id: 1,
    }
}

pub fn forensic() -> Actor {
    Actor {
        role: ActorRole::Forensic,
        user_id: 3,
    }
}

pub fn evidence(id: &str, description: &str) -> EvidenceItem {
    EvidenceItem {
        evidence_id: id.into(),
        description: description.into(),
        evidence_type: "weapon".into(),
        date: "2024-03-14".into(),
        time: "10:30".into(),
        investigating_officer_id: 2,
        forensic_officer_id: 3,
        file_path: Some(format!("uploads/{id}.jpg")),
        file_name: Some(format!("{id}.jpg")),
        status: "active".into(),
    }
}

pub fn officer(id: i64, username: &str, role: ActorRole) -> UserAccount {
    UserAccount {
        id,
        username: username.into(),
        password_hash: format!("hash-of-{username}"),
        role,
        full_name: format!("Officer {username}"),
        badge_number: Some(format!("B-{id:03}")),
        email: Some(format!("{username}@precinct.example")),
        is_active: true,
    }
}

pub fn custody_entry(log_id: i64, evidence_id: &str) -> CustodyLog {
    CustodyLog {
        log_id,
        evidence_id: evidence_id.into(),
        log_type: "entry".into(),
        item_count: Some(1),
        size: Some("small".into()),
        description: Some("bagged and tagged".into()),
        source: Some("crime scene".into()),
        destination: Some("evidence room".into()),
        officer_id: 2,
    }
}

pub fn create_evidence_action(id: &str, description: &str) -> Action {
    Action::CreateEvidence(CreateEvidence {
        actor: forensic(),
        evidence: evidence(id, description),
    })
}

pub fn create_user_action(id: i64, username: &str, role: ActorRole) -> Action {
    Action::CreateUser(CreateUser {
        actor: admin(),
        user: officer(id, username, role),
    })
}

pub fn create_custody_action(log_id: i64, evidence_id: &str) -> Action {
    Action::CreateCustodyLog(CreateCustodyLog {
        actor: forensic(),
        log: custody_entry(log_id, evidence_id),
    })
}

/// A fresh world: shared store, opened ledger, integrity façade.
pub fn world() -> (Ledger, Integrity, InMemoryStore) {
    let store = InMemoryStore::new();
    let time = FixedTimeSource::at(1_700_000_000);
    let ledger = LedgerService::open(store.clone(), time.clone()).expect("open fresh ledger");
    let integrity = IntegrityService::new(store.clone(), store.clone(), time);
    (ledger, integrity, store)
}

/// Apply an action through the sanctioned write path: store row mutation
/// plus exactly one ledger append, as one logical operation.
pub fn sanctioned(ledger: &Ledger, store: &InMemoryStore, action: Action) {
    store.apply(&action);
    ledger.record(action).expect("append+persist");
}
