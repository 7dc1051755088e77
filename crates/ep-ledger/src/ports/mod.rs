//! # Ledger Ports
//!
//! Outbound traits the ledger requires from its host, plus the default
//! adapters used in tests.

pub mod outbound;
