//! # Evidence Replay Rules
//!
//! Create seeds the full row snapshot; updates overlay only the changed
//! fields and the digest is recomputed over the updated canonical set;
//! delete flips status to `"deleted"`, which folds into the digest.

use std::collections::BTreeMap;

use ep_ledger::{Action, Record};
use serde_json::Value;
use shared_types::{Digest, EvidenceItem};

use crate::domain::projection::{Projected, ReplayRules};
use crate::domain::report::EntityKind;

pub struct EvidenceRules;

impl ReplayRules for EvidenceRules {
    type Row = EvidenceItem;

    const ENTITY: EntityKind = EntityKind::Evidence;

    fn apply(states: &mut BTreeMap<String, Projected<EvidenceItem>>, record: &Record) {
        match &record.action {
            Action::CreateEvidence(p) => {
                states.insert(
                    p.evidence.evidence_id.clone(),
                    Projected {
                        live: p.evidence.live(),
                        row: p.evidence.clone(),
                    },
                );
            }
            Action::UpdateEvidence(p) => {
                if let Some(state) = states.get_mut(&p.evidence_id) {
                    p.changes.apply_to(&mut state.row);
                    state.live = state.row.live();
                }
            }
            Action::DeleteEvidence(p) => {
                if let Some(state) = states.get_mut(&p.evidence_id) {
                    state.row.status = "deleted".into();
                    state.live = false;
                }
            }
            _ => {}
        }
    }

    fn row_id(row: &EvidenceItem) -> String {
        row.evidence_id.clone()
    }

    fn canonical_fields(row: &EvidenceItem) -> Vec<(&'static str, Value)> {
        row.canonical_fields()
    }

    fn content_digest(row: &EvidenceItem) -> Digest {
        row.content_digest()
    }

    fn snapshot_live(row: &EvidenceItem) -> bool {
        row.live()
    }
}
