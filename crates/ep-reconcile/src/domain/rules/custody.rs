//! # Custody Log Replay Rules
//!
//! Custody logs are create-only: the projection is the creation snapshot
//! itself, and any later divergence on an immutable log is tampering.

use std::collections::BTreeMap;

use ep_ledger::{Action, Record};
use serde_json::Value;
use shared_types::{CustodyLog, Digest};

use crate::domain::projection::{Projected, ReplayRules};
use crate::domain::report::EntityKind;

pub struct CustodyLogRules;

impl ReplayRules for CustodyLogRules {
    type Row = CustodyLog;

    const ENTITY: EntityKind = EntityKind::CustodyLog;

    fn apply(states: &mut BTreeMap<String, Projected<CustodyLog>>, record: &Record) {
        if let Action::CreateCustodyLog(p) = &record.action {
            states.insert(
                p.log.log_id.to_string(),
                Projected {
                    row: p.log.clone(),
                    live: true,
                },
            );
        }
    }

    fn row_id(row: &CustodyLog) -> String {
        row.log_id.to_string()
    }

    fn canonical_fields(row: &CustodyLog) -> Vec<(&'static str, Value)> {
        row.canonical_fields()
    }

    fn content_digest(row: &CustodyLog) -> Digest {
        row.content_digest()
    }

    fn snapshot_live(_row: &CustodyLog) -> bool {
        true
    }
}
