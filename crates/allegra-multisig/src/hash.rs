//! Script hashing.
//!
//! A native script's identifier is BLAKE2b-224 over its CBOR encoding with a
//! single `0x00` namespace byte in front. The prefix is always added here,
//! whatever the bytes looked like when the script was decoded.
//!
//! Hash input layout (bytes, in order):
//!   1. `NATIVE_SCRIPT_HASH_PREFIX`
//!   2. canonical CBOR of the script

use blake2::digest::consts::U28;
use blake2::{Blake2b, Digest};

use allegra_contracts::hash::{ScriptHash, HASH_LEN};

/// Namespace byte that distinguishes native scripts from other script
/// languages in the hash preimage.
pub const NATIVE_SCRIPT_HASH_PREFIX: u8 = 0x00;

type Blake2b224 = Blake2b<U28>;

/// Compute the 28-byte BLAKE2b digest of `data`.
pub fn blake2b_224(data: &[u8]) -> [u8; HASH_LEN] {
    let mut hasher = Blake2b224::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; HASH_LEN];
    output.copy_from_slice(&result);
    output
}

/// Compute the script hash of an already-encoded native script.
pub fn native_script_hash(cbor: &[u8]) -> ScriptHash {
    let mut preimage = Vec::with_capacity(cbor.len() + 1);
    preimage.push(NATIVE_SCRIPT_HASH_PREFIX);
    preimage.extend_from_slice(cbor);
    ScriptHash::new(blake2b_224(&preimage))
}
