//! 28-byte hash identifiers.
//!
//! `PubKeyHash` names a signer (the BLAKE2b-224 digest of a verification key)
//! and `ScriptHash` names a script. Both are plain byte wrappers: they print
//! as lowercase hex and appear on the wire as a CBOR byte string. Computing
//! a script hash is the job of the script crates, not of this module.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ScriptError, ScriptResult};

/// Length in bytes of every hash wrapper in this module.
pub const HASH_LEN: usize = 28;

macro_rules! hash_wrapper {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; HASH_LEN]);

        impl $name {
            /// Wrap an already-sized digest.
            pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
                Self(bytes)
            }

            /// Copy `bytes` into a new wrapper.
            ///
            /// Returns `ScriptError::InvalidHash` unless exactly 28 bytes are given.
            pub fn from_bytes(bytes: &[u8]) -> ScriptResult<Self> {
                let digest: [u8; HASH_LEN] =
                    bytes.try_into().map_err(|_| ScriptError::InvalidHash {
                        reason: format!(
                            "{} must be {} bytes, got {}",
                            $label,
                            HASH_LEN,
                            bytes.len()
                        ),
                    })?;
                Ok(Self(digest))
            }

            /// Parse a 56-character hex string.
            pub fn from_hex(s: &str) -> ScriptResult<Self> {
                let bytes = hex::decode(s).map_err(|e| ScriptError::InvalidHash {
                    reason: format!("{} '{}' is not valid hex: {}", $label, s, e),
                })?;
                Self::from_bytes(&bytes)
            }

            pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = ScriptError;

            fn from_str(s: &str) -> ScriptResult<Self> {
                Self::from_hex(s)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; HASH_LEN]> for $name {
            fn from(bytes: [u8; HASH_LEN]) -> Self {
                Self(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_bytes(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer
                    .deserialize_bytes(DigestVisitor { label: $label })
                    .map(Self)
            }
        }
    };
}

hash_wrapper!(
    /// The hash of a verification key, required by `Sig` scripts.
    PubKeyHash,
    "public key hash"
);

hash_wrapper!(
    /// The identifier of a script, used as a credential elsewhere in the ledger.
    ScriptHash,
    "script hash"
);

impl ScriptHash {
    /// Decode a script hash embedded in CBOR as a byte string.
    ///
    /// The input must be exactly one untagged byte string of `HASH_LEN` bytes.
    pub fn from_cbor(bytes: &[u8]) -> ScriptResult<Self> {
        let invalid = |reason: String| ScriptError::InvalidHash {
            reason: format!("failed to decode script hash CBOR: {}", reason),
        };

        let mut reader = bytes;
        let value: ciborium::Value =
            ciborium::from_reader(&mut reader).map_err(|e| invalid(e.to_string()))?;
        if !reader.is_empty() {
            return Err(invalid(format!("{} trailing bytes", reader.len())));
        }
        match value {
            ciborium::Value::Bytes(digest) => Self::from_bytes(&digest),
            other => Err(invalid(format!("expected a byte string, got {:?}", other))),
        }
    }

    /// Encode as a CBOR byte string.
    ///
    /// # Panics
    ///
    /// Panics if the CBOR serializer fails to write into a `Vec`, which
    /// cannot happen for a byte string.
    pub fn to_cbor(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).expect("a byte string always encodes to CBOR");
        buf
    }
}

/// Accepts a CBOR byte string of exactly `HASH_LEN` bytes.
struct DigestVisitor {
    label: &'static str,
}

impl<'de> Visitor<'de> for DigestVisitor {
    type Value = [u8; HASH_LEN];

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {}-byte {}", HASH_LEN, self.label)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        v.try_into()
            .map_err(|_| E::invalid_length(v.len(), &self))
    }
}
