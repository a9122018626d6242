//! # allegra-script
//!
//! Allegra-era native scripts: the Shelley multisig variants plus the
//! `after` and `before` time locks.
//!
//! ## Overview
//!
//! [`NativeScript`] is a closed six-kind sum type. It owns the unified
//! surface for building, encoding (CBOR and JSON), hashing and evaluating a
//! script; the multisig variants delegate to
//! [`MultisigScript`](allegra_multisig::MultisigScript) with `NativeScript`
//! as the child type, so time locks may appear at any depth.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use allegra_script::NativeScript;
//!
//! let script = NativeScript::all(vec![NativeScript::sig(owner), NativeScript::after(1_000)]);
//! let hash = script.hash();
//! assert!(script.eval(&ctx));
//! ```
//!
//! ## Two zero-byte conventions
//!
//! Decoding tolerates one leading `0x00` in front of the CBOR array. Hashing
//! always prepends `0x00` to the canonical encoding. They are separate rules
//! implemented in separate places and neither implies the other.

pub mod codec;
pub mod json;
pub mod script;

pub use codec::{AFTER_TAG, BEFORE_TAG};
pub use script::{NativeScript, ScriptKind};

// ── Tests ─────────────────────────────────────────────────────────────────────
