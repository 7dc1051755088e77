//! # Reconciliation Domain
//!
//! Projection (chain replay), snapshot diffing, and the tamper report types.

pub mod projection;
pub mod report;
pub mod rules;
