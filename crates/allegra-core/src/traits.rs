//! Core trait definitions for native script evaluation.
//!
//! These traits are the seam between scripts and the ledger:
//!
//! - `SignatureContext`: which key hashes have signed (base multisig scripts)
//! - `NativeContext`: adds the time-lock checks used by `After`/`Before`
//! - `Evaluate`: a script that can be judged against a context
//! - `Witness`: an evaluable script that can name itself by hash
//!
//! Contexts are read-only. One context may be reused for every script checked
//! during a validation pass.

use allegra_contracts::hash::{PubKeyHash, ScriptHash};

/// Signer attestation facts for the transaction under validation.
pub trait SignatureContext {
    /// Return true if the ledger has verified a signature from `signer`.
    fn is_signed_by(&self, signer: &PubKeyHash) -> bool;
}

/// Everything a native script needs: signer facts plus time-lock checks.
pub trait NativeContext: SignatureContext {
    /// Return true if the transaction cannot be valid before `slot`, i.e. its
    /// lower validity bound is at or after `slot`.
    fn is_after(&self, slot: u64) -> bool;

    /// Return true if the transaction cannot be valid from `slot` on, i.e.
    /// its upper validity bound is at or before `slot`.
    fn is_before(&self, slot: u64) -> bool;
}

/// A script that can be evaluated against a context of type `C`.
///
/// Evaluation is pure: the same script and context always give the same
/// answer and neither is modified.
pub trait Evaluate<C: ?Sized> {
    fn eval(&self, ctx: &C) -> bool;
}

/// A script supplied as a transaction witness.
///
/// The validation pass matches witnesses to required script hashes and then
/// evaluates them.
pub trait Witness<C: ?Sized>: Evaluate<C> {
    fn script_hash(&self) -> ScriptHash;
}
