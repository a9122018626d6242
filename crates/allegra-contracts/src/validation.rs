//! Validation pass report types.
//!
//! A validation pass checks every script a transaction requires against the
//! witnesses it supplies. All failures are collected so the caller sees the
//! full set in one report.

use crate::hash::ScriptHash;

/// Why a required script did not pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No supplied witness hashes to the required script hash.
    MissingWitness,
    /// The witness was found but evaluated to false.
    NotSatisfied,
}

/// A single failed requirement within a `ValidationReport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// The required script hash that failed.
    pub script_hash: ScriptHash,
    pub kind: FailureKind,
    /// Human-readable explanation.
    pub message: String,
}

/// The outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// True only if every required script was found and satisfied.
    pub passed: bool,
    /// All failures collected during the pass. Empty on pass.
    pub failures: Vec<ValidationFailure>,
}
