//! # User Replay Rules
//!
//! Beyond the common replay+diff shape, users get two extra checks:
//!
//! - **id remap**: a username the ledger recorded under one id found under a
//!   different id in the store is id tampering, not a generic field
//!   mismatch;
//! - **credential drift**: `password_hash` sits outside the canonical
//!   digest, so an out-of-band hash change is reported as its own
//!   higher-severity category instead of one more profile-field entry.

use std::collections::BTreeMap;

use ep_ledger::{Action, Record};
use serde_json::Value;
use shared_types::{Digest, UserAccount};

use crate::domain::projection::{Projected, ReplayRules};
use crate::domain::report::{Divergence, EntityKind, TamperKind, TamperedEntity};

pub struct UserRules;

impl ReplayRules for UserRules {
    type Row = UserAccount;

    const ENTITY: EntityKind = EntityKind::User;

    fn apply(states: &mut BTreeMap<String, Projected<UserAccount>>, record: &Record) {
        match &record.action {
            Action::CreateUser(p) => {
                states.insert(
                    p.user.id.to_string(),
                    Projected {
                        live: p.user.is_active,
                        row: p.user.clone(),
                    },
                );
            }
            Action::UpdateUser(p) => {
                if let Some(state) = states.get_mut(&p.user_id.to_string()) {
                    p.changes.apply_to(&mut state.row);
                    state.live = state.row.is_active;
                }
            }
            Action::DeleteUser(p) => {
                if let Some(state) = states.get_mut(&p.user_id.to_string()) {
                    state.row.is_active = false;
                    state.live = false;
                }
            }
            _ => {}
        }
    }

    fn row_id(row: &UserAccount) -> String {
        row.id.to_string()
    }

    fn canonical_fields(row: &UserAccount) -> Vec<(&'static str, Value)> {
        row.canonical_fields()
    }

    fn content_digest(row: &UserAccount) -> Digest {
        row.content_digest()
    }

    fn snapshot_live(row: &UserAccount) -> bool {
        row.is_active
    }

    fn displaced(
        projected_id: &str,
        projected: &Projected<UserAccount>,
        snapshot: &[UserAccount],
    ) -> Option<TamperedEntity> {
        let moved = snapshot
            .iter()
            .find(|row| row.username == projected.row.username)?;
        Some(TamperedEntity {
            entity: EntityKind::User,
            entity_id: projected_id.into(),
            kind: TamperKind::IdRemapped,
            fields: vec![Divergence {
                field: "id".into(),
                current: Value::from(moved.id),
                expected: Value::from(projected.row.id),
            }],
        })
    }

    fn extra_checks(
        states: &BTreeMap<String, Projected<UserAccount>>,
        snapshot: &[UserAccount],
        out: &mut Vec<TamperedEntity>,
    ) {
        for row in snapshot {
            let Some(projected) = states.get(&row.id.to_string()) else {
                continue;
            };
            if row.password_hash != projected.row.password_hash {
                out.push(TamperedEntity {
                    entity: EntityKind::User,
                    entity_id: row.id.to_string(),
                    kind: TamperKind::CredentialDrift,
                    fields: vec![Divergence {
                        field: "password_hash".into(),
                        current: Value::from(row.password_hash.clone()),
                        expected: Value::from(projected.row.password_hash.clone()),
                    }],
                });
            }
        }
    }
}
