//! # Ledger Domain
//!
//! Pure chain logic: typed actions, sealed records, linkage verification.

pub mod action;
pub mod chain;
pub mod errors;
pub mod record;
