//! Signer attestation types.
//!
//! A `SignerSet` holds the public key hashes whose signatures the ledger has
//! already verified for a transaction. Native scripts never check signatures
//! themselves; `Sig` scripts only ask whether a key hash is in this set.

use std::collections::BTreeSet;

use crate::hash::PubKeyHash;

/// The key hashes attested as signers of the transaction under validation.
///
/// Ordered so that iteration (and anything logged from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerSet {
    inner: BTreeSet<PubKeyHash>,
}

impl SignerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `signer` as having signed.
    pub fn attest(&mut self, signer: PubKeyHash) {
        self.inner.insert(signer);
    }

    /// Return true if `signer` has been attested.
    pub fn contains(&self, signer: &PubKeyHash) -> bool {
        self.inner.contains(signer)
    }

    /// Return an iterator over all attested signers in byte order.
    pub fn iter(&self) -> impl Iterator<Item = &PubKeyHash> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<PubKeyHash> for SignerSet {
    fn from_iter<I: IntoIterator<Item = PubKeyHash>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
