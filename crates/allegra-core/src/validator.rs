//! The validation pass: match required script hashes to witnesses and
//! evaluate them against one shared context.
//!
//!   required hashes → find witness by hash → Evaluate::eval → report
//!
//! Every required hash is checked, even after a failure, so the report lists
//! all problems at once. Witnesses that no requirement refers to are ignored.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use allegra_contracts::{
    error::{ScriptError, ScriptResult},
    hash::ScriptHash,
    validation::{FailureKind, ValidationFailure, ValidationReport},
};

use crate::traits::Witness;

/// Runs validation passes against a single borrowed context.
///
/// Construct one validator per transaction; the context is never modified so
/// the same validator may check any number of witness sets.
pub struct ScriptValidator<'a, C: ?Sized> {
    ctx: &'a C,
}

impl<'a, C: ?Sized> ScriptValidator<'a, C> {
    pub fn new(ctx: &'a C) -> Self {
        Self { ctx }
    }

    /// Check every hash in `required` against `witnesses`.
    ///
    /// # Pass rules
    ///
    /// 1. Hash each witness once and index it by its script hash.
    /// 2. For each required hash, look up its witness; none → `MissingWitness`.
    /// 3. Evaluate the witness against the context; false → `NotSatisfied`.
    ///
    /// Failures are data, not errors: the report is always returned.
    pub fn validate<S: Witness<C>>(
        &self,
        required: &[ScriptHash],
        witnesses: &[S],
    ) -> ValidationReport {
        let by_hash: BTreeMap<ScriptHash, &S> = witnesses
            .iter()
            .map(|w| (w.script_hash(), w))
            .collect();

        for hash in by_hash.keys().filter(|h| !required.contains(*h)) {
            debug!(script_hash = %hash, "ignoring witness that no requirement refers to");
        }

        let mut failures = Vec::new();

        for hash in required {
            let Some(witness) = by_hash.get(hash) else {
                warn!(script_hash = %hash, "required script has no witness");
                failures.push(ValidationFailure {
                    script_hash: *hash,
                    kind: FailureKind::MissingWitness,
                    message: format!("no witness supplied for script {}", hash),
                });
                continue;
            };

            if witness.eval(self.ctx) {
                debug!(script_hash = %hash, "required script satisfied");
            } else {
                warn!(script_hash = %hash, "required script not satisfied");
                failures.push(ValidationFailure {
                    script_hash: *hash,
                    kind: FailureKind::NotSatisfied,
                    message: format!("script {} evaluated to false", hash),
                });
            }
        }

        info!(
            required = required.len(),
            witnesses = witnesses.len(),
            failures = failures.len(),
            "validation pass complete"
        );

        ValidationReport {
            passed: failures.is_empty(),
            failures,
        }
    }

    /// Run `validate` and turn a failing report into
    /// `ScriptError::ValidationFailed` naming every failure.
    pub fn enforce<S: Witness<C>>(
        &self,
        required: &[ScriptHash],
        witnesses: &[S],
    ) -> ScriptResult<()> {
        let report = self.validate(required, witnesses);
        if report.passed {
            return Ok(());
        }

        let reason = report
            .failures
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(ScriptError::ValidationFailed { reason })
    }
}
