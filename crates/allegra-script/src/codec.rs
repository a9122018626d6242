//! CBOR encoding and decoding for `NativeScript`.
//!
//! Wire layout for the time locks:
//!   `[4, slot]`: `After(slot)`
//!   `[5, slot]`: `Before(slot)`
//!
//! Every other tag belongs to the multisig variants and is decoded by
//! `MultisigScript::<NativeScript>::decode_tagged`, which in turn decodes
//! each child with `NativeScript`'s `Deserialize`. The two decoders recurse
//! into each other for as deep as the tree goes; no depth limit applies.

use std::fmt;

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use allegra_contracts::error::{ScriptError, ScriptResult};
use allegra_multisig::codec::{self, end_of_fields, next_field, strip_era_marker};
use allegra_multisig::MultisigScript;

use crate::script::NativeScript;

pub const AFTER_TAG: u64 = 4;
pub const BEFORE_TAG: u64 = 5;

impl NativeScript {
    /// Decode a script from CBOR.
    ///
    /// One leading `0x00` era marker is tolerated and discarded. Stripping
    /// works on a copy of the input slice, so `bytes` itself is unchanged.
    pub fn from_cbor(bytes: &[u8]) -> ScriptResult<Self> {
        let script: Self = codec::decode(strip_era_marker(bytes))?;
        debug!(kind = %script.kind(), "decoded native script");
        Ok(script)
    }

    /// Decode a script from hex-encoded CBOR.
    pub fn from_cbor_hex(s: &str) -> ScriptResult<Self> {
        let bytes = hex::decode(s.trim()).map_err(|e| ScriptError::MalformedCbor {
            reason: format!("script CBOR is not valid hex: {}", e),
        })?;
        Self::from_cbor(&bytes)
    }

    /// Encode as canonical CBOR. No era marker is ever written.
    pub fn to_cbor(&self) -> Vec<u8> {
        codec::encode(self)
    }

    pub fn to_cbor_hex(&self) -> String {
        hex::encode(self.to_cbor())
    }
}

impl Serialize for NativeScript {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Multisig(script) => script.serialize(serializer),
            Self::After(slot) => (AFTER_TAG, slot).serialize(serializer),
            Self::Before(slot) => (BEFORE_TAG, slot).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for NativeScript {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(NativeScriptVisitor)
    }
}

struct NativeScriptVisitor;

impl<'de> Visitor<'de> for NativeScriptVisitor {
    type Value = NativeScript;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a native script array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let tag: u64 = next_field(&mut seq, 0)?;
        match tag {
            AFTER_TAG | BEFORE_TAG => {
                let slot = next_field(&mut seq, 1)?;
                end_of_fields(&mut seq, 2)?;
                Ok(if tag == AFTER_TAG {
                    NativeScript::After(slot)
                } else {
                    NativeScript::Before(slot)
                })
            }
            other => MultisigScript::decode_tagged(other, &mut seq).map(NativeScript::Multisig),
        }
    }
}
