//! CBOR plumbing shared by every native script type.
//!
//! A native script is a definite-length CBOR array whose first element is an
//! unsigned tag selecting the variant. Script types implement `Serialize` and
//! `Deserialize` by hand to pin that layout; this module wraps `ciborium`
//! and owns the decode-time era marker rule.
//!
//! Nesting depth is not capped: anything `encode` writes, `decode` reads
//! back. Semantic tags (major type 6) are rejected anywhere in the input.
//!
//! The era marker is a single `0x00` byte some producers put in front of a
//! script. It is tolerated on decode and never written on encode. It is not
//! the same thing as the hash prefix in `crate::hash`.

use ciborium::Value;
use serde::de::{self, DeserializeOwned, IgnoredAny, SeqAccess};
use serde::{Deserialize, Serialize};

use allegra_contracts::error::{ScriptError, ScriptResult};

/// The optional byte stripped from the front of encoded scripts.
pub const ERA_MARKER: u8 = 0x00;

/// Return `bytes` without one leading era marker, if present.
///
/// Only a single byte is removed. The input slice is left untouched so the
/// caller can still read from the original position.
pub fn strip_era_marker(bytes: &[u8]) -> &[u8] {
    match bytes.split_first() {
        Some((&ERA_MARKER, rest)) => rest,
        _ => bytes,
    }
}

/// Decode exactly one script from `bytes`. Trailing bytes are an error.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> ScriptResult<T> {
    let mut reader = bytes;
    let value: Value = ciborium::de::from_reader_with_recursion_limit(&mut reader, usize::MAX)
        .map_err(|e| malformed(e.to_string()))?;
    if !reader.is_empty() {
        return Err(malformed(format!(
            "{} trailing bytes after script",
            reader.len()
        )));
    }
    reject_tags(&value)?;
    value.deserialized().map_err(|e| malformed(e.to_string()))
}

/// Encode `value` as canonical CBOR.
///
/// # Panics
///
/// Panics if serialization fails, which cannot happen for the script types
/// in this workspace: they only write unsigned integers, byte strings and
/// definite-length arrays into a `Vec`.
pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).expect("native scripts always encode to CBOR");
    buf
}

/// Walk the decoded tree without recursion and fail on the first tag.
fn reject_tags(value: &Value) -> ScriptResult<()> {
    let mut pending = vec![value];
    while let Some(item) = pending.pop() {
        match item {
            Value::Tag(tag, _) => {
                return Err(malformed(format!("unexpected CBOR tag {}", tag)));
            }
            Value::Array(items) => pending.extend(items),
            Value::Map(entries) => pending.extend(entries.iter().flat_map(|(k, v)| [k, v])),
            _ => {}
        }
    }
    Ok(())
}

fn malformed(reason: String) -> ScriptError {
    ScriptError::MalformedCbor { reason }
}

/// Read the next field of a script array, failing if the array ended early.
///
/// `index` is the position of the field, used in the error message.
pub fn next_field<'de, A, T>(seq: &mut A, index: usize) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(index, &"a complete native script array"))
}

/// Fail if a script array has elements left after its last field.
///
/// `len` is the number of fields the variant expects.
pub fn end_of_fields<'de, A: SeqAccess<'de>>(seq: &mut A, len: usize) -> Result<(), A::Error> {
    match seq.next_element::<IgnoredAny>()? {
        Some(_) => Err(de::Error::invalid_length(len + 1, &"no fields after the last one")),
        None => Ok(()),
    }
}
