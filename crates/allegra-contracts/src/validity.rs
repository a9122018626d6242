//! Transaction validity interval.
//!
//! The ledger bounds every transaction by an optional lower slot
//! (`invalid_before`) and an optional upper slot (`invalid_hereafter`).
//! Time-lock scripts are judged against these bounds, never against a wall
//! clock.

use serde::{Deserialize, Serialize};

/// The slot range in which a transaction may be included in a block.
///
/// A missing bound means the interval is open on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityInterval {
    /// The transaction is invalid in any slot strictly before this one.
    #[serde(default)]
    pub invalid_before: Option<u64>,

    /// The transaction is invalid in this slot and any slot after it.
    #[serde(default)]
    pub invalid_hereafter: Option<u64>,
}

impl ValidityInterval {
    pub fn new(invalid_before: Option<u64>, invalid_hereafter: Option<u64>) -> Self {
        Self {
            invalid_before,
            invalid_hereafter,
        }
    }

    /// An interval open on both sides.
    pub fn unbounded() -> Self {
        Self::default()
    }
}
