//! # Integrity Façade
//!
//! The single entry point external callers use to ask "is everything still
//! correct?": reload the persisted chain, verify its links, reconcile every
//! tracked entity type against the store, and merge the verdicts.

use std::collections::BTreeMap;

use ep_ledger::{Chain, ChainStore, LedgerError, LinkReport, TimeSource};
use shared_types::StoreError;

use crate::domain::projection::reconcile_type;
use crate::domain::report::{DataReport, IntegrityReport, TamperedEntity};
use crate::domain::rules::{CustodyLogRules, EvidenceRules, UserRules};
use crate::ports::outbound::EntitySnapshots;


/// Errors from façade operations that cannot produce a partial report
/// (currently only the stats read).
#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Dashboard-style aggregate over the chain and the store.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LedgerStats {
    pub chain_len: usize,
    pub chain_valid: bool,
    pub data_valid: bool,
    /// `chain_valid && data_valid`.
    pub valid: bool,
    pub total_evidence: usize,
    pub total_users: usize,
    pub active_users: usize,
    pub evidence_status: BTreeMap<String, usize>,
    pub role_distribution: BTreeMap<String, usize>,
}

/// Orchestrates reload → verify → reconcile → merge.
pub struct IntegrityService<CS, ES, TS> {
    chain_store: CS,
    snapshots: ES,
    time: TS,
}

impl<CS, ES, TS> IntegrityService<CS, ES, TS>
where
    CS: ChainStore,
    ES: EntitySnapshots,
    TS: TimeSource,
{
    pub fn new(chain_store: CS, snapshots: ES, time: TS) -> Self {
        IntegrityService {
            chain_store,
            snapshots,
            time,
        }
    }

    /// Full integrity check. Always returns a report, even when every
    /// sub-check fails; nothing short of a programming error escapes as an
    /// `Err` to the caller.
    pub fn check_integrity(&self) -> IntegrityReport {
        let (chain, link) = match self.reload_chain() {
            Ok(chain) => {
                let link = chain.verify_links();
                (Some(chain), link)
            }
            Err(e) => (
                None,
                LinkReport {
                    valid: false,
                    break_index: None,
                    message: format!("persisted chain could not be reloaded: {e}"),
                },
            ),
        };

        let data = match &chain {
            Some(chain) => self.reconcile_data(chain),
            None => DataReport {
                valid: false,
                tampered: Vec::new(),
                failures: vec!["reconciliation skipped: chain unavailable".into()],
                message: "reconciliation skipped: chain unavailable".into(),
            },
        };

        let report = IntegrityReport {
            valid: link.valid && data.valid,
            chain_valid: link.valid,
            chain_break_index: link.break_index,
            chain_message: link.message,
            data_valid: data.valid,
            data_message: data.message,
            tampered: data.tampered,
            failures: data.failures,
        };
        if report.valid {
            tracing::info!("[ep-reconcile] integrity check passed ({} tracked record(s) clean)",
                chain.map(|c| c.len()).unwrap_or(0));
        } else {
            tracing::warn!(
                "[ep-reconcile] integrity check FAILED: chain_valid={} data_valid={} tampered={}",
                report.chain_valid,
                report.data_valid,
                report.tampered.len(),
            );
        }
        report
    }

    /// Reconcile every tracked entity type against the current store
    /// snapshot. A collaborator failure on one type is caught and surfaced
    /// as a failure message; the other types still reconcile.
    pub fn reconcile_data(&self, chain: &Chain) -> DataReport {
        let mut tampered: Vec<TamperedEntity> = Vec::new();
        let mut failures: Vec<String> = Vec::new();

        match self.snapshots.evidence() {
            Ok(rows) => tampered.extend(reconcile_type::<EvidenceRules>(chain, &rows)),
            Err(e) => failures.push(format!("evidence snapshot unavailable: {e}")),
        }
        match self.snapshots.users() {
            Ok(rows) => tampered.extend(reconcile_type::<UserRules>(chain, &rows)),
            Err(e) => failures.push(format!("user snapshot unavailable: {e}")),
        }
        match self.snapshots.custody_logs() {
            Ok(rows) => tampered.extend(reconcile_type::<CustodyLogRules>(chain, &rows)),
            Err(e) => failures.push(format!("custody log snapshot unavailable: {e}")),
        }

        let valid = tampered.is_empty();
        let message = if valid {
            "all store records match the ledger".into()
        } else {
            format!(
                "tampering detected: {} record(s) diverge from the ledger",
                tampered.len()
            )
        };
        DataReport {
            valid,
            tampered,
            failures,
            message,
        }
    }

    /// Dashboard aggregates from one chain reload plus one snapshot read.
    ///
    /// Unlike [`IntegrityService::check_integrity`], a store failure here
    /// propagates: there is no meaningful partial stats object.
    pub fn stats(&self) -> Result<LedgerStats, IntegrityError> {
        let chain = self.reload_chain()?;
        let link = chain.verify_links();
        let data = self.reconcile_data(&chain);

        let evidence = self.snapshots.evidence()?;
        let users = self.snapshots.users()?;

        let mut evidence_status: BTreeMap<String, usize> = BTreeMap::new();
        for row in &evidence {
            *evidence_status.entry(row.status.clone()).or_default() += 1;
        }
        let mut role_distribution: BTreeMap<String, usize> = BTreeMap::new();
        for row in &users {
            *role_distribution.entry(row.role.to_string()).or_default() += 1;
        }

        Ok(LedgerStats {
            chain_len: chain.len(),
            chain_valid: link.valid,
            data_valid: data.valid,
            valid: link.valid && data.valid,
            total_evidence: evidence.len(),
            total_users: users.len(),
            active_users: users.iter().filter(|u| u.is_active).count(),
            evidence_status,
            role_distribution,
        })
    }

    /// Re-read the persisted chain; an absent blob yields a fresh
    /// genesis-only chain. Stored digests are trusted as given here and
    /// only recomputed by `verify_links`.
    fn reload_chain(&self) -> Result<Chain, IntegrityError> {
        match self.chain_store.load()? {
            Some(blob) => Ok(Chain::from_json(&blob)?),
            None => Ok(Chain::new(self.time.now())?),
        }
    }
}
