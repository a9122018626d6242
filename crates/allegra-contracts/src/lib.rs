//! # allegra-contracts
//!
//! Shared types for the Allegra native script crates.
//!
//! Every crate in the workspace imports its hash wrappers, signer sets and
//! error types from here. No script logic lives in this crate.

pub mod error;
pub mod hash;
pub mod signer;
pub mod validation;
pub mod validity;

#[cfg(test)]
mod tests {
    use super::*;
    use error::ScriptError;
    use hash::{PubKeyHash, ScriptHash, HASH_LEN};
    use signer::SignerSet;
    use validity::ValidityInterval;

    const KEY_A: &str = "2f3d4cf10d0471a1db9f2d2907de867968c27bca6272f062cd1c2413";

    // ── Hash wrappers ────────────────────────────────────────────────────────

    #[test]
    fn pub_key_hash_hex_round_trips() {
        let hash = PubKeyHash::from_hex(KEY_A).unwrap();
        assert_eq!(hash.to_hex(), KEY_A);
        assert_eq!(hash.to_string(), KEY_A);
        assert_eq!(KEY_A.parse::<PubKeyHash>().unwrap(), hash);
    }

    #[test]
    fn hash_rejects_wrong_length() {
        let err = PubKeyHash::from_bytes(&[0u8; 27]).unwrap_err();
        match err {
            ScriptError::InvalidHash { reason } => {
                assert!(reason.contains("28 bytes"), "unexpected reason: {reason}");
                assert!(reason.contains("27"), "unexpected reason: {reason}");
            }
            other => panic!("expected InvalidHash, got {:?}", other),
        }
    }

    #[test]
    fn hash_rejects_bad_hex() {
        assert!(matches!(
            ScriptHash::from_hex("zz"),
            Err(ScriptError::InvalidHash { .. })
        ));
    }

    #[test]
    fn hashes_order_by_bytes() {
        let low = PubKeyHash::new([0u8; HASH_LEN]);
        let high = PubKeyHash::new([1u8; HASH_LEN]);
        assert!(low < high);
    }

    #[test]
    fn script_hash_cbor_is_a_byte_string() {
        let hash = ScriptHash::new([7u8; HASH_LEN]);
        let cbor = hash.to_cbor();

        // Major type 2 with a one-byte length prefix.
        assert_eq!(&cbor[..2], &[0x58, 0x1c]);
        assert_eq!(&cbor[2..], &[7u8; HASH_LEN]);
        assert_eq!(ScriptHash::from_cbor(&cbor).unwrap(), hash);
    }

    #[test]
    fn script_hash_cbor_rejects_short_byte_string() {
        // 0x43 = byte string of length 3.
        assert!(ScriptHash::from_cbor(&[0x43, 1, 2, 3]).is_err());
    }

    #[test]
    fn script_hash_cbor_rejects_tags_and_trailing_bytes() {
        let cbor = ScriptHash::new([7u8; HASH_LEN]).to_cbor();

        let mut tagged = vec![0xd8, 0x18];
        tagged.extend_from_slice(&cbor);
        assert!(ScriptHash::from_cbor(&tagged).is_err());

        let mut trailing = cbor;
        trailing.push(0x00);
        assert!(ScriptHash::from_cbor(&trailing).is_err());
    }

    // ── SignerSet ────────────────────────────────────────────────────────────

    #[test]
    fn signer_set_attest_and_contains() {
        let mut signers = SignerSet::new();
        let a = PubKeyHash::new([1u8; HASH_LEN]);
        let b = PubKeyHash::new([2u8; HASH_LEN]);

        assert!(signers.is_empty());
        signers.attest(a);
        assert!(signers.contains(&a));
        assert!(!signers.contains(&b));

        // Attesting twice is idempotent.
        signers.attest(a);
        assert_eq!(signers.len(), 1);
    }

    #[test]
    fn signer_set_iterates_in_byte_order() {
        let a = PubKeyHash::new([1u8; HASH_LEN]);
        let b = PubKeyHash::new([2u8; HASH_LEN]);
        let signers: SignerSet = [b, a].into_iter().collect();

        let order: Vec<_> = signers.iter().copied().collect();
        assert_eq!(order, vec![a, b]);
    }

    // ── ValidityInterval ─────────────────────────────────────────────────────

    #[test]
    fn validity_interval_defaults_to_unbounded() {
        let interval = ValidityInterval::unbounded();
        assert_eq!(interval.invalid_before, None);
        assert_eq!(interval.invalid_hereafter, None);
        assert_eq!(interval, ValidityInterval::new(None, None));
    }

    // ── ScriptError display messages ─────────────────────────────────────────

    #[test]
    fn error_malformed_json_display() {
        let err = ScriptError::MalformedJson {
            reason: "missing \"type\"".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("malformed native script JSON"));
        assert!(msg.contains("type"));
    }

    #[test]
    fn error_malformed_cbor_display() {
        let err = ScriptError::MalformedCbor {
            reason: "unexpected tag 9".to_string(),
        };
        assert!(err.to_string().contains("unexpected tag 9"));
    }

    #[test]
    fn error_config_error_display() {
        let err = ScriptError::ConfigError {
            reason: "bad signer".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("bad signer"));
    }
}
