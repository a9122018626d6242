//! # allegra-multisig
//!
//! Shelley-era multisig scripts: signature requirements combined with
//! `all`, `any` and `at-least` thresholds.
//!
//! ## Overview
//!
//! [`MultisigScript<C>`] holds the four variants and is generic over its child
//! type so that later eras can nest their own script kinds inside it.
//! [`ShelleyScript`] closes the recursion for plain multisig use.
//!
//! The CBOR decoder exposes [`MultisigScript::decode_tagged`] and the JSON
//! decoder takes a child-parser callback ([`MultisigScript::from_json_with`]),
//! so a richer script type can claim its own tags first and delegate the rest.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use allegra_multisig::ShelleyScript;
//!
//! let script = ShelleyScript::from_cbor(&bytes)?;
//! println!("{}", script.hash());
//! ```

pub mod codec;
pub mod hash;
pub mod script;
pub mod shelley;

pub use hash::{blake2b_224, native_script_hash, NATIVE_SCRIPT_HASH_PREFIX};
pub use script::MultisigScript;
pub use shelley::ShelleyScript;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use allegra_contracts::{
        error::ScriptError,
        hash::{PubKeyHash, HASH_LEN},
    };
    use allegra_core::TxContext;

    use crate::codec::strip_era_marker;
    use crate::{blake2b_224, ShelleyScript};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn key(byte: u8) -> PubKeyHash {
        PubKeyHash::new([byte; HASH_LEN])
    }

    fn signed_by(keys: &[u8]) -> TxContext {
        keys.iter()
            .fold(TxContext::default(), |ctx, b| ctx.with_signer(key(*b)))
    }

    fn sig_cbor(byte: u8) -> Vec<u8> {
        let mut out = vec![0x82, 0x00, 0x58, 0x1c];
        out.extend_from_slice(&[byte; HASH_LEN]);
        out
    }

    // ── CBOR layout ───────────────────────────────────────────────────────────

    #[test]
    fn sig_encodes_as_tag_zero_and_byte_string() {
        assert_eq!(ShelleyScript::sig(key(1)).to_cbor(), sig_cbor(1));
    }

    #[test]
    fn empty_combinators_encode_with_empty_arrays() {
        assert_eq!(ShelleyScript::all(vec![]).to_cbor(), vec![0x82, 0x01, 0x80]);
        assert_eq!(ShelleyScript::any(vec![]).to_cbor(), vec![0x82, 0x02, 0x80]);
        assert_eq!(
            ShelleyScript::at_least(2, vec![]).to_cbor(),
            vec![0x83, 0x03, 0x02, 0x80]
        );
    }

    #[test]
    fn nested_children_are_embedded_in_order() {
        let script = ShelleyScript::any(vec![ShelleyScript::sig(key(1)), ShelleyScript::sig(key(2))]);

        let mut expected = vec![0x82, 0x02, 0x82];
        expected.extend(sig_cbor(1));
        expected.extend(sig_cbor(2));

        assert_eq!(script.to_cbor(), expected);
    }

    #[test]
    fn cbor_round_trips_nested_tree() {
        let script = ShelleyScript::at_least(
            1,
            vec![
                ShelleyScript::sig(key(1)),
                ShelleyScript::all(vec![ShelleyScript::sig(key(2)), ShelleyScript::sig(key(3))]),
            ],
        );
        let decoded = ShelleyScript::from_cbor(&script.to_cbor()).unwrap();
        assert_eq!(decoded, script);
    }

    #[test]
    fn cbor_tolerates_one_era_marker() {
        let bytes = sig_cbor(4);
        let mut marked = vec![0x00];
        marked.extend_from_slice(&bytes);

        assert_eq!(
            ShelleyScript::from_cbor(&marked).unwrap(),
            ShelleyScript::from_cbor(&bytes).unwrap()
        );
    }

    #[test]
    fn strip_era_marker_removes_at_most_one_byte() {
        assert_eq!(strip_era_marker(&[0x00, 0x00, 0x82]), &[0x00, 0x82]);
        assert_eq!(strip_era_marker(&[0x82, 0x00]), &[0x82, 0x00]);
        assert_eq!(strip_era_marker(&[]), &[] as &[u8]);
    }

    #[test]
    fn cbor_rejects_unknown_tag() {
        // [9, 0]
        match ShelleyScript::from_cbor(&[0x82, 0x09, 0x00]) {
            Err(ScriptError::MalformedCbor { reason }) => {
                assert!(reason.contains("native script tag"), "unexpected reason: {reason}");
            }
            other => panic!("expected MalformedCbor, got {:?}", other),
        }
    }

    #[test]
    fn cbor_rejects_truncated_and_trailing_input() {
        let bytes = sig_cbor(1);
        assert!(ShelleyScript::from_cbor(&bytes[..bytes.len() - 1]).is_err());

        let mut trailing = bytes.clone();
        trailing.push(0x00);
        assert!(ShelleyScript::from_cbor(&trailing).is_err());
    }

    #[test]
    fn cbor_rejects_short_key_hash() {
        // [0, h'010203']
        assert!(ShelleyScript::from_cbor(&[0x82, 0x00, 0x43, 1, 2, 3]).is_err());
    }

    // ── JSON ──────────────────────────────────────────────────────────────────

    #[test]
    fn json_uses_ledger_field_names() {
        let script = ShelleyScript::at_least(1, vec![ShelleyScript::sig(key(1))]);
        assert_eq!(
            script.to_json(),
            json!({
                "type": "atLeast",
                "required": 1,
                "scripts": [{ "type": "sig", "keyHash": "01".repeat(HASH_LEN) }],
            })
        );
    }

    #[test]
    fn json_round_trips() {
        let script = ShelleyScript::all(vec![
            ShelleyScript::sig(key(1)),
            ShelleyScript::any(vec![ShelleyScript::sig(key(2))]),
        ]);
        assert_eq!(ShelleyScript::from_json(&script.to_json()).unwrap(), script);
    }

    #[test]
    fn json_rejects_missing_type() {
        match ShelleyScript::from_json(&json!({ "scripts": [] })) {
            Err(ScriptError::MalformedJson { reason }) => {
                assert!(reason.contains("\"type\""), "unexpected reason: {reason}");
            }
            other => panic!("expected MalformedJson, got {:?}", other),
        }
    }

    #[test]
    fn json_rejects_unknown_type() {
        match ShelleyScript::from_json(&json!({ "type": "after", "slot": 1 })) {
            Err(ScriptError::MalformedJson { reason }) => {
                assert!(reason.contains("'after'"), "unexpected reason: {reason}");
            }
            other => panic!("expected MalformedJson, got {:?}", other),
        }
    }

    #[test]
    fn json_rejects_bad_fields() {
        assert!(ShelleyScript::from_json(&json!({ "type": "all" })).is_err());
        assert!(ShelleyScript::from_json(&json!({ "type": "sig", "keyHash": "abcd" })).is_err());
        assert!(ShelleyScript::from_json(&json!({ "type": "atLeast", "scripts": [] })).is_err());
        assert!(ShelleyScript::from_json(&json!({ "type": "atLeast", "required": -1, "scripts": [] })).is_err());
        assert!(ShelleyScript::from_json(&json!("sig")).is_err());
    }

    // ── Evaluation ────────────────────────────────────────────────────────────

    #[test]
    fn sig_requires_attested_signer() {
        let script = ShelleyScript::sig(key(1));
        assert!(script.0.eval(&signed_by(&[1])));
        assert!(!script.0.eval(&signed_by(&[2])));
    }

    #[test]
    fn empty_all_is_true_and_empty_any_is_false() {
        let ctx = TxContext::default();
        assert!(ShelleyScript::all(vec![]).0.eval(&ctx));
        assert!(!ShelleyScript::any(vec![]).0.eval(&ctx));
    }

    #[test]
    fn at_least_counts_satisfied_children() {
        let script = ShelleyScript::at_least(
            2,
            vec![ShelleyScript::sig(key(1)), ShelleyScript::sig(key(2)), ShelleyScript::sig(key(3))],
        );
        assert!(!script.0.eval(&signed_by(&[1])));
        assert!(script.0.eval(&signed_by(&[1, 3])));
        assert!(script.0.eval(&signed_by(&[1, 2, 3])));
    }

    /// Thresholds are not checked against the child count: an unreachable
    /// threshold decodes fine and evaluates to false.
    #[test]
    fn at_least_threshold_is_never_validated() {
        let script = ShelleyScript::at_least(5, vec![ShelleyScript::sig(key(1))]);
        let decoded = ShelleyScript::from_cbor(&script.to_cbor()).unwrap();
        assert_eq!(decoded, script);
        assert!(!decoded.0.eval(&signed_by(&[1])));

        assert!(ShelleyScript::at_least(0, vec![]).0.eval(&TxContext::default()));
    }

    // ── Hashing ───────────────────────────────────────────────────────────────

    #[test]
    fn hash_prefixes_zero_byte_before_cbor() {
        let script = ShelleyScript::sig(key(1));
        let mut preimage = vec![0x00];
        preimage.extend(script.to_cbor());

        assert_eq!(script.hash().as_bytes(), &blake2b_224(&preimage));
        assert_ne!(script.hash().as_bytes(), &blake2b_224(&script.to_cbor()));
    }

    #[test]
    fn blake2b_224_known_answer() {
        // BLAKE2b-224 of the empty string.
        assert_eq!(
            hex::encode(blake2b_224(b"")),
            "836cc68931c2e4e3e838602eca1902591d216837bafddfe6f0c8cb07"
        );
    }
}
