//! # Generic Replay + Diff
//!
//! One control flow for all tracked entity types: fold the chain once into
//! a per-id projected state, then diff each projection against the store's
//! current snapshot. Entity-type specifics (which actions touch which rows,
//! canonical fields, liveness, special cases) live in [`ReplayRules`]
//! implementations.

use std::collections::BTreeMap;

use ep_ledger::{Chain, Record};
use serde_json::Value;
use shared_types::Digest;

use super::report::{Divergence, EntityKind, TamperKind, TamperedEntity};

/// An entity's chain-derived expected state.
#[derive(Debug, Clone, PartialEq)]
pub struct Projected<R> {
    /// Expected row content, creation snapshot plus layered updates.
    pub row: R,
    /// Whether the entity is expected to still be live (soft deletes flip
    /// this; the row itself is expected to remain present).
    pub live: bool,
}

/// Per-entity-type replay and diff rules.
///
/// `Row` doubles as both the projected state and the snapshot row shape, so
/// projection and store content digest to directly comparable values.
pub trait ReplayRules {
    type Row: Clone;

    const ENTITY: EntityKind;

    /// Fold one chain record into the projected states. Records referencing
    /// other entity types are ignored.
    fn apply(states: &mut BTreeMap<String, Projected<Self::Row>>, record: &Record);

    /// Stable key for a row (the entity id as a string).
    fn row_id(row: &Self::Row) -> String;

    /// Canonical (name, value) pairs in digest order.
    fn canonical_fields(row: &Self::Row) -> Vec<(&'static str, Value)>;

    /// Content digest over the canonical field set.
    fn content_digest(row: &Self::Row) -> Digest;

    /// Liveness as the snapshot row reports it.
    fn snapshot_live(row: &Self::Row) -> bool;

    /// Hook for projected ids missing from the snapshot: return a more
    /// specific finding than the default "row missing" entry, if the rules
    /// can identify one (users use this for id-remap detection).
    fn displaced(
        _projected_id: &str,
        _projected: &Projected<Self::Row>,
        _snapshot: &[Self::Row],
    ) -> Option<TamperedEntity> {
        None
    }

    /// Hook for checks outside the canonical field set (users use this for
    /// credential drift).
    fn extra_checks(
        _states: &BTreeMap<String, Projected<Self::Row>>,
        _snapshot: &[Self::Row],
        _out: &mut Vec<TamperedEntity>,
    ) {
    }
}

/// Scan the chain once, in order, and build the id → projected state map.
pub fn project<P: ReplayRules>(chain: &Chain) -> BTreeMap<String, Projected<P::Row>> {
    let mut states = BTreeMap::new();
    for record in chain.records() {
        P::apply(&mut states, record);
    }
    states
}

/// Diff projected states against the store's current snapshot.
///
/// Snapshot rows with no projection are skipped: they predate ledger
/// tracking and are exempt from reconciliation by policy.
pub fn diff_snapshot<P: ReplayRules>(
    states: &BTreeMap<String, Projected<P::Row>>,
    snapshot: &[P::Row],
) -> Vec<TamperedEntity> {
    let mut out = Vec::new();

    // Creations on the ledger but an empty table is total loss, reported as
    // one store-wiped finding rather than a missing-row entry per id.
    if !states.is_empty() && snapshot.is_empty() {
        out.push(TamperedEntity {
            entity: P::ENTITY,
            entity_id: "*".into(),
            kind: TamperKind::StoreWiped,
            fields: vec![Divergence {
                field: "row_count".into(),
                current: Value::from(0),
                expected: Value::from(states.len()),
            }],
        });
        return out;
    }

    let index: BTreeMap<String, &P::Row> =
        snapshot.iter().map(|row| (P::row_id(row), row)).collect();

    for (id, projected) in states {
        let Some(row) = index.get(id) else {
            let finding = P::displaced(id, projected, snapshot)
                .unwrap_or_else(|| missing_row::<P>(id, projected));
            out.push(finding);
            continue;
        };

        // Digest first: O(1) per entity on the happy path. Field-level
        // diffing only runs on mismatch.
        if P::content_digest(row) == P::content_digest(&projected.row) {
            continue;
        }

        let fields = field_divergences::<P>(row, &projected.row);
        let kind = if P::snapshot_live(row) != projected.live {
            TamperKind::LivenessFlipped
        } else {
            TamperKind::FieldMismatch
        };
        out.push(TamperedEntity {
            entity: P::ENTITY,
            entity_id: id.clone(),
            kind,
            fields,
        });
    }

    P::extra_checks(states, snapshot, &mut out);
    out
}

/// Replay then diff in one call.
pub fn reconcile_type<P: ReplayRules>(chain: &Chain, snapshot: &[P::Row]) -> Vec<TamperedEntity> {
    let states = project::<P>(chain);
    let findings = diff_snapshot::<P>(&states, snapshot);
    if !findings.is_empty() {
        tracing::warn!(
            "[ep-reconcile] {} {} record(s) diverge from the ledger",
            findings.len(),
            P::ENTITY,
        );
    }
    findings
}

fn field_divergences<P: ReplayRules>(current: &P::Row, expected: &P::Row) -> Vec<Divergence> {
    P::canonical_fields(current)
        .into_iter()
        .zip(P::canonical_fields(expected))
        .filter(|((_, cur), (_, exp))| cur != exp)
        .map(|((name, cur), (_, exp))| Divergence {
            field: name.into(),
            current: cur,
            expected: exp,
        })
        .collect()
}

/// A projected row the store no longer holds at all. Soft deletes keep rows
/// present, so physical absence is itself tampering.
fn missing_row<P: ReplayRules>(id: &str, projected: &Projected<P::Row>) -> TamperedEntity {
    let expected: serde_json::Map<String, Value> = P::canonical_fields(&projected.row)
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    TamperedEntity {
        entity: P::ENTITY,
        entity_id: id.into(),
        kind: TamperKind::FieldMismatch,
        fields: vec![Divergence {
            field: "row".into(),
            current: Value::Null,
            expected: Value::Object(expected),
        }],
    }
}
