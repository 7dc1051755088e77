//! # Chain Integrity Across Persistence
//!
//! Every scenario here persists, doctors the blob out-of-band, reloads, and
//! expects verification to pinpoint the first break.

use ep_ledger::{Chain, ChainStore};

use crate::fixtures::*;

fn persisted_records(store: &ep_reconcile::InMemoryStore) -> Vec<serde_json::Value> {
    let blob = store.load().unwrap().expect("chain persisted");
    serde_json::from_str(&blob).unwrap()
}

fn persist_records(store: &ep_reconcile::InMemoryStore, records: &[serde_json::Value]) {
    store.save(&serde_json::to_string(records).unwrap()).unwrap();
}

fn five_record_world() -> (Ledger, Integrity, ep_reconcile::InMemoryStore) {
    crate::init_tracing();
    let (ledger, integrity, store) = world();
    for id in ["E1", "E2", "E3", "E4"] {
        sanctioned(&ledger, &store, create_evidence_action(id, "item"));
    }
    (ledger, integrity, store)
}

#[test]
fn appended_chain_survives_persistence_round_trip() {
    let (_ledger, _integrity, store) = five_record_world();
    let blob = store.load().unwrap().unwrap();
    let chain = Chain::from_json(&blob).unwrap();
    assert_eq!(chain.len(), 5);
    assert!(chain.verify_links().valid);
}

#[test]
fn field_edit_in_persisted_record_breaks_at_that_index() {
    let (_ledger, integrity, store) = five_record_world();

    let mut records = persisted_records(&store);
    records[3]["created_at"] = 1_600_000_000u64.into();
    persist_records(&store, &records);

    let report = integrity.check_integrity();
    assert!(!report.chain_valid);
    assert_eq!(report.chain_break_index, Some(3));
}

#[test]
fn digest_edit_alone_breaks_at_that_index() {
    let (_ledger, integrity, store) = five_record_world();

    let mut records = persisted_records(&store);
    records[2]["digest"] = serde_json::Value::from("00".repeat(32));
    persist_records(&store, &records);

    let report = integrity.check_integrity();
    assert!(!report.chain_valid);
    assert_eq!(report.chain_break_index, Some(2));
}

#[test]
fn deleting_record_two_of_five_breaks_at_index_two() {
    let (_ledger, integrity, store) = five_record_world();

    let mut records = persisted_records(&store);
    records.remove(2);
    persist_records(&store, &records);

    let report = integrity.check_integrity();
    assert!(!report.chain_valid);
    assert_eq!(report.chain_break_index, Some(2));
}

#[test]
fn inserted_record_detected() {
    let (_ledger, integrity, store) = five_record_world();

    let mut records = persisted_records(&store);
    let forged = records[1].clone();
    records.insert(2, forged);
    persist_records(&store, &records);

    let report = integrity.check_integrity();
    assert!(!report.chain_valid);
}

#[test]
fn truncated_blob_is_a_reload_failure_not_a_pass() {
    let (_ledger, integrity, store) = five_record_world();
    store.save("[").unwrap();

    let report = integrity.check_integrity();
    assert!(!report.valid);
    assert!(!report.chain_valid);
    assert!(report.chain_message.contains("could not be reloaded"));
}

#[test]
fn absent_blob_yields_fresh_valid_genesis_chain() {
    crate::init_tracing();
    let (_ledger, integrity, _store) = world();
    // Nothing was ever appended, so nothing was ever persisted.
    let report = integrity.check_integrity();
    assert!(report.valid);
    assert!(report.tampered.is_empty());
}
