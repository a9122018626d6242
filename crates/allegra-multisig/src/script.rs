//! The four Shelley-era multisig variants.
//!
//! `MultisigScript<C>` is generic over its child type `C`. The Shelley era
//! closes the recursion with `ShelleyScript`; later eras plug in a richer
//! child type so nested scripts of any kind can appear wherever a child is
//! expected. Decoders hand control back to `C` for every child, which is how
//! the two parsers recurse into each other.
//!
//! Wire layout (CBOR):
//!   `[0, keyhash]`, `[1, [* C]]`, `[2, [* C]]`, `[3, n, [* C]]`

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, SeqAccess, Unexpected, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use allegra_contracts::{
    error::{ScriptError, ScriptResult},
    hash::PubKeyHash,
};
use allegra_core::traits::{Evaluate, SignatureContext};

use crate::codec::{end_of_fields, next_field};

pub const SIG_TAG: u64 = 0;
pub const ALL_TAG: u64 = 1;
pub const ANY_TAG: u64 = 2;
pub const AT_LEAST_TAG: u64 = 3;

/// A signature requirement or a boolean combination of child scripts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MultisigScript<C> {
    /// Satisfied when the key hash has signed.
    Sig(PubKeyHash),
    /// Satisfied when every child is. Vacuously true when empty.
    All(Vec<C>),
    /// Satisfied when any child is. False when empty.
    Any(Vec<C>),
    /// Satisfied when at least `required` children are.
    ///
    /// `required` is never checked against `scripts.len()`; a threshold that
    /// cannot be met simply evaluates to false.
    AtLeast { required: u64, scripts: Vec<C> },
}

impl<C> MultisigScript<C> {
    pub fn sig(hash: PubKeyHash) -> Self {
        Self::Sig(hash)
    }

    pub fn all(scripts: Vec<C>) -> Self {
        Self::All(scripts)
    }

    pub fn any(scripts: Vec<C>) -> Self {
        Self::Any(scripts)
    }

    pub fn at_least(required: u64, scripts: Vec<C>) -> Self {
        Self::AtLeast { required, scripts }
    }

    /// The JSON `"type"` name of this variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Sig(_) => "sig",
            Self::All(_) => "all",
            Self::Any(_) => "any",
            Self::AtLeast { .. } => "atLeast",
        }
    }

    /// Child scripts in declaration order. Empty for `Sig`.
    pub fn children(&self) -> &[C] {
        match self {
            Self::Sig(_) => &[],
            Self::All(scripts) | Self::Any(scripts) | Self::AtLeast { scripts, .. } => scripts,
        }
    }

    /// Evaluate against `ctx`, delegating each child to its own `Evaluate`.
    pub fn eval<X>(&self, ctx: &X) -> bool
    where
        X: SignatureContext + ?Sized,
        C: Evaluate<X>,
    {
        match self {
            Self::Sig(hash) => ctx.is_signed_by(hash),
            Self::All(scripts) => scripts.iter().all(|s| s.eval(ctx)),
            Self::Any(scripts) => scripts.iter().any(|s| s.eval(ctx)),
            Self::AtLeast { required, scripts } => {
                let satisfied = scripts.iter().filter(|s| s.eval(ctx)).count() as u64;
                satisfied >= *required
            }
        }
    }

    // ── JSON ─────────────────────────────────────────────────────────────────

    /// Encode as JSON, rendering each child with `encode_child`.
    pub fn to_json_with<F>(&self, encode_child: F) -> Value
    where
        F: Fn(&C) -> Value,
    {
        let encode_all = |scripts: &[C]| scripts.iter().map(&encode_child).collect::<Vec<_>>();
        match self {
            Self::Sig(hash) => json!({ "type": "sig", "keyHash": hash.to_hex() }),
            Self::All(scripts) => json!({ "type": "all", "scripts": encode_all(scripts) }),
            Self::Any(scripts) => json!({ "type": "any", "scripts": encode_all(scripts) }),
            Self::AtLeast { required, scripts } => json!({
                "type": "atLeast",
                "required": required,
                "scripts": encode_all(scripts),
            }),
        }
    }

    /// Decode from JSON, parsing each child with `parse_child`.
    ///
    /// Errors returned by `parse_child` are propagated unchanged.
    pub fn from_json_with<F>(value: &Value, parse_child: F) -> ScriptResult<Self>
    where
        F: Fn(&Value) -> ScriptResult<C>,
    {
        let obj = json_object(value)?;
        let kind = json_type(obj)?;

        match kind {
            "sig" => {
                let key_hash = obj
                    .get("keyHash")
                    .and_then(Value::as_str)
                    .ok_or_else(|| malformed("sig script requires a string \"keyHash\""))?;
                let hash = PubKeyHash::from_hex(key_hash)
                    .map_err(|e| malformed(format!("invalid \"keyHash\": {}", e)))?;
                Ok(Self::Sig(hash))
            }
            "all" => Ok(Self::All(json_children(obj, kind, &parse_child)?)),
            "any" => Ok(Self::Any(json_children(obj, kind, &parse_child)?)),
            "atLeast" => {
                let required = obj
                    .get("required")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| {
                        malformed("atLeast script requires a non-negative integer \"required\"")
                    })?;
                Ok(Self::AtLeast {
                    required,
                    scripts: json_children(obj, kind, &parse_child)?,
                })
            }
            other => Err(malformed(format!("unrecognized native script type '{}'", other))),
        }
    }

    // ── CBOR ─────────────────────────────────────────────────────────────────

    /// Decode the fields that follow `tag` in a script array.
    ///
    /// The caller has already consumed the tag, which lets a richer script
    /// type try its own tags first and hand everything else to this decoder.
    /// Children are decoded with `C`'s own `Deserialize`.
    pub fn decode_tagged<'de, A>(tag: u64, seq: &mut A) -> Result<Self, A::Error>
    where
        A: SeqAccess<'de>,
        C: Deserialize<'de>,
    {
        let (script, len) = match tag {
            SIG_TAG => (Self::Sig(next_field(seq, 1)?), 2),
            ALL_TAG => (Self::All(next_field(seq, 1)?), 2),
            ANY_TAG => (Self::Any(next_field(seq, 1)?), 2),
            AT_LEAST_TAG => (
                Self::AtLeast {
                    required: next_field(seq, 1)?,
                    scripts: next_field(seq, 2)?,
                },
                3,
            ),
            other => {
                return Err(de::Error::invalid_value(
                    Unexpected::Unsigned(other),
                    &"a native script tag",
                ))
            }
        };
        end_of_fields(seq, len)?;
        Ok(script)
    }
}

impl<C, X> Evaluate<X> for MultisigScript<C>
where
    X: SignatureContext + ?Sized,
    C: Evaluate<X>,
{
    fn eval(&self, ctx: &X) -> bool {
        MultisigScript::eval(self, ctx)
    }
}

impl<C: Serialize> Serialize for MultisigScript<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Sig(hash) => (SIG_TAG, hash).serialize(serializer),
            Self::All(scripts) => (ALL_TAG, scripts).serialize(serializer),
            Self::Any(scripts) => (ANY_TAG, scripts).serialize(serializer),
            Self::AtLeast { required, scripts } => {
                (AT_LEAST_TAG, required, scripts).serialize(serializer)
            }
        }
    }
}

impl<'de, C: Deserialize<'de>> Deserialize<'de> for MultisigScript<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(MultisigVisitor(PhantomData))
    }
}

struct MultisigVisitor<C>(PhantomData<C>);

impl<'de, C: Deserialize<'de>> Visitor<'de> for MultisigVisitor<C> {
    type Value = MultisigScript<C>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a multisig script array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let tag: u64 = next_field(&mut seq, 0)?;
        MultisigScript::decode_tagged(tag, &mut seq)
    }
}

// ── JSON helpers ──────────────────────────────────────────────────────────────

pub(crate) fn malformed(reason: impl Into<String>) -> ScriptError {
    ScriptError::MalformedJson {
        reason: reason.into(),
    }
}

/// Require `value` to be a JSON object.
pub fn json_object(value: &Value) -> ScriptResult<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| malformed(format!("expected a JSON object, got {}", value)))
}

/// Read the mandatory string `"type"` field.
pub fn json_type(obj: &Map<String, Value>) -> ScriptResult<&str> {
    obj.get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("native script requires a string \"type\" field"))
}

fn json_children<C, F>(obj: &Map<String, Value>, kind: &str, parse_child: &F) -> ScriptResult<Vec<C>>
where
    F: Fn(&Value) -> ScriptResult<C>,
{
    obj.get("scripts")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(format!("{} script requires a \"scripts\" array", kind)))?
        .iter()
        .map(parse_child)
        .collect()
}
