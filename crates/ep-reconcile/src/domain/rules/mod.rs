//! # Per-Entity Replay Rules
//!
//! One module per tracked entity type, each implementing
//! [`crate::ReplayRules`] for the generic replay+diff routine.

mod custody;
mod evidence;
mod users;

pub use custody::CustodyLogRules;
pub use evidence::EvidenceRules;
pub use users::UserRules;
