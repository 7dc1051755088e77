//! # Store Drift Scenarios
//!
//! The chain itself stays intact in these tests; only the store is edited
//! behind the ledger's back.

use ep_ledger::{Action, UpdateEvidence, UpdateUser};
use ep_reconcile::{EntityKind, TamperKind};
use shared_types::{ActorRole, EvidenceChanges, UserChanges};

use crate::fixtures::*;

#[test]
fn clean_world_reconciles_clean() {
    crate::init_tracing();
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_evidence_action("E1", "knife"));
    sanctioned(&ledger, &store, create_user_action(7, "jdoe", ActorRole::Police));
    sanctioned(&ledger, &store, create_custody_action(1, "E1"));

    let report = integrity.check_integrity();
    assert!(report.valid, "unexpected report: {report:?}");
}

#[test]
fn evidence_description_drift_names_field_and_both_values() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_evidence_action("E1", "knife"));
    store.edit_evidence("E1", |row| row.description = "gun".into());

    let report = integrity.check_integrity();
    assert!(report.chain_valid);
    assert!(!report.data_valid);
    let finding = &report.tampered[0];
    assert_eq!(finding.entity, EntityKind::Evidence);
    assert_eq!(finding.entity_id, "E1");
    assert_eq!(finding.fields.len(), 1);
    assert_eq!(finding.fields[0].field, "description");
    assert_eq!(finding.fields[0].current, "gun");
    assert_eq!(finding.fields[0].expected, "knife");
}

#[test]
fn ledgered_update_then_matching_store_is_clean() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_evidence_action("E1", "knife"));
    sanctioned(
        &ledger,
        &store,
        Action::UpdateEvidence(UpdateEvidence {
            actor: forensic(),
            evidence_id: "E1".into(),
            changes: EvidenceChanges {
                description: Some("gun".into()),
                ..Default::default()
            },
        }),
    );

    let report = integrity.check_integrity();
    assert!(report.valid, "unexpected report: {report:?}");
}

#[test]
fn multiple_field_drift_enumerates_every_diverging_field() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_evidence_action("E1", "knife"));
    store.edit_evidence("E1", |row| {
        row.description = "gun".into();
        row.date = "2020-01-01".into();
        row.forensic_officer_id = 99;
    });

    let report = integrity.check_integrity();
    let fields: Vec<&str> = report.tampered[0]
        .fields
        .iter()
        .map(|d| d.field.as_str())
        .collect();
    assert_eq!(fields, vec!["description", "date", "forensic_officer_id"]);
}

#[test]
fn resurrected_evidence_is_liveness_flip() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_evidence_action("E1", "knife"));
    sanctioned(
        &ledger,
        &store,
        Action::DeleteEvidence(ep_ledger::DeleteEvidence {
            actor: forensic(),
            evidence_id: "E1".into(),
            description: "knife".into(),
        }),
    );

    // Someone flips the row back to active without a ledger record.
    store.edit_evidence("E1", |row| row.status = "active".into());

    let report = integrity.check_integrity();
    assert_eq!(report.tampered[0].kind, TamperKind::LivenessFlipped);
    assert!(report.tampered[0].fields.iter().any(|d| d.field == "status"));
}

#[test]
fn user_profile_and_credential_drift_reported_separately() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_user_action(7, "jdoe", ActorRole::Police));
    store.edit_user(7, |row| {
        row.role = ActorRole::Admin;
        row.password_hash = "cracked".into();
    });

    let report = integrity.check_integrity();
    assert_eq!(report.tampered.len(), 2);

    let profile = report
        .tampered
        .iter()
        .find(|t| t.kind == TamperKind::FieldMismatch)
        .expect("profile finding");
    assert_eq!(profile.fields[0].field, "role");

    let credential = report
        .tampered
        .iter()
        .find(|t| t.kind == TamperKind::CredentialDrift)
        .expect("credential finding");
    assert_eq!(credential.fields[0].field, "password_hash");
}

#[test]
fn ledgered_role_change_is_clean() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_user_action(7, "jdoe", ActorRole::Police));
    sanctioned(
        &ledger,
        &store,
        Action::UpdateUser(UpdateUser {
            actor: admin(),
            user_id: 7,
            changes: UserChanges {
                role: Some(ActorRole::Forensic),
                ..Default::default()
            },
        }),
    );

    assert!(integrity.check_integrity().valid);
}

#[test]
fn username_moved_to_new_id_is_id_tampering() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_user_action(7, "jdoe", ActorRole::Police));
    store.remove_user(7);
    store.apply(&create_user_action(42, "jdoe", ActorRole::Police));

    let report = integrity.check_integrity();
    let remap = report
        .tampered
        .iter()
        .find(|t| t.kind == TamperKind::IdRemapped)
        .expect("remap finding");
    assert_eq!(remap.entity_id, "7");
    assert_eq!(remap.fields[0].current, 42);
    assert_eq!(remap.fields[0].expected, 7);
}

#[test]
fn wiped_custody_table_reported_as_store_wiped() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_evidence_action("E1", "knife"));
    sanctioned(&ledger, &store, create_custody_action(1, "E1"));
    sanctioned(&ledger, &store, create_custody_action(2, "E1"));
    store.wipe(EntityKind::CustodyLog);

    let report = integrity.check_integrity();
    let wiped = report
        .tampered
        .iter()
        .find(|t| t.kind == TamperKind::StoreWiped)
        .expect("wipe finding");
    assert_eq!(wiped.entity, EntityKind::CustodyLog);
    assert_eq!(wiped.fields[0].expected, 2);
}

#[test]
fn pre_ledger_rows_stay_exempt() {
    let (ledger, integrity, store) = world();
    // Row inserted before ledger tracking began: store only, no chain record.
    store.apply(&create_evidence_action("LEGACY-1", "old file"));
    sanctioned(&ledger, &store, create_evidence_action("E1", "knife"));

    let report = integrity.check_integrity();
    assert!(report.valid);

    // Once edited it still stays exempt; only a baseline append would make
    // it auditable.
    store.edit_evidence("LEGACY-1", |row| row.description = "anything".into());
    assert!(integrity.check_integrity().valid);
}

#[test]
fn one_failing_snapshot_does_not_block_the_others() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_evidence_action("E1", "knife"));
    sanctioned(&ledger, &store, create_custody_action(1, "E1"));
    store.edit_custody_log(1, |row| row.destination = Some("unknown".into()));
    store.fail_reads(EntityKind::Evidence, true);

    let report = integrity.check_integrity();
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].contains("evidence snapshot unavailable"));
    // Custody logs still reconciled and still flag.
    assert_eq!(report.tampered.len(), 1);
    assert_eq!(report.tampered[0].entity, EntityKind::CustodyLog);
}

#[test]
fn reconciliation_is_idempotent() {
    let (ledger, integrity, store) = world();
    sanctioned(&ledger, &store, create_evidence_action("E1", "knife"));
    store.edit_evidence("E1", |row| row.description = "gun".into());

    assert_eq!(integrity.check_integrity(), integrity.check_integrity());
}
