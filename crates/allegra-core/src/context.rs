//! The transaction-backed evaluation context.
//!
//! `TxContext` answers script questions from a transaction's attested
//! signers and its validity interval, following the ledger's time-lock rules:
//! an open bound never satisfies a time-lock.

use allegra_contracts::{hash::PubKeyHash, signer::SignerSet, validity::ValidityInterval};

use crate::traits::{NativeContext, SignatureContext};

/// Facts about one transaction, shared by every script checked against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxContext {
    pub signers: SignerSet,
    pub validity: ValidityInterval,
}

impl TxContext {
    pub fn new(signers: SignerSet, validity: ValidityInterval) -> Self {
        Self { signers, validity }
    }

    /// Return a copy of this context with `signer` attested.
    pub fn with_signer(mut self, signer: PubKeyHash) -> Self {
        self.signers.attest(signer);
        self
    }

    /// Return a copy of this context with the given validity interval.
    pub fn with_validity(mut self, validity: ValidityInterval) -> Self {
        self.validity = validity;
        self
    }
}

impl SignatureContext for TxContext {
    fn is_signed_by(&self, signer: &PubKeyHash) -> bool {
        self.signers.contains(signer)
    }
}

impl NativeContext for TxContext {
    fn is_after(&self, slot: u64) -> bool {
        matches!(self.validity.invalid_before, Some(lower) if slot <= lower)
    }

    fn is_before(&self, slot: u64) -> bool {
        matches!(self.validity.invalid_hereafter, Some(upper) if upper <= slot)
    }
}
