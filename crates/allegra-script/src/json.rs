//! JSON encoding and decoding for `NativeScript`.
//!
//! The time locks are `{"type":"after","slot":n}` and
//! `{"type":"before","slot":n}`. Every other `"type"` is handed to the
//! multisig decoder together with `NativeScript::from_json` as the child
//! parser.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use allegra_contracts::error::{ScriptError, ScriptResult};
use allegra_multisig::script::{json_object, json_type};
use allegra_multisig::MultisigScript;

use crate::script::NativeScript;

impl NativeScript {
    /// Decode a script from a parsed JSON value.
    ///
    /// `"type"` is mandatory. Time locks need a non-negative integer
    /// `"slot"`; a missing, negative, fractional or non-numeric slot fails.
    pub fn from_json(value: &Value) -> ScriptResult<Self> {
        let obj = json_object(value)?;
        match json_type(obj)? {
            "after" => Ok(Self::After(slot_field(obj, "after")?)),
            "before" => Ok(Self::Before(slot_field(obj, "before")?)),
            _ => MultisigScript::from_json_with(value, Self::from_json).map(Self::Multisig),
        }
    }

    /// Parse `s` as JSON, then decode it with `from_json`.
    ///
    /// The parser runs without serde_json's nesting limit so that any tree
    /// `to_json` produces can be read back.
    pub fn from_json_str(s: &str) -> ScriptResult<Self> {
        let invalid = |e: serde_json::Error| ScriptError::MalformedJson {
            reason: format!("invalid JSON: {}", e),
        };

        let mut de = serde_json::Deserializer::from_str(s);
        de.disable_recursion_limit();
        let value = Value::deserialize(&mut de).map_err(invalid)?;
        de.end().map_err(invalid)?;
        Self::from_json(&value)
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Multisig(script) => script.to_json_with(Self::to_json),
            Self::After(slot) => json!({ "type": "after", "slot": slot }),
            Self::Before(slot) => json!({ "type": "before", "slot": slot }),
        }
    }
}

fn slot_field(obj: &Map<String, Value>, kind: &str) -> ScriptResult<u64> {
    obj.get("slot")
        .and_then(Value::as_u64)
        .ok_or_else(|| ScriptError::MalformedJson {
            reason: format!("{} script requires a non-negative integer \"slot\"", kind),
        })
}
