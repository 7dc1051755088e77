//! # Reconciliation Ports
//!
//! Outbound traits toward the primary store, plus the in-memory adapter
//! used by tests and demos.

pub mod outbound;
