//! TOML-driven evaluation context configuration.
//!
//! `ContextConfig` describes a transaction's signers and validity interval in
//! a small TOML document so contexts can be prepared outside of code (the CLI
//! reads one per `eval` call).
//!
//! ```toml
//! signers = ["2f3d4cf10d0471a1db9f2d2907de867968c27bca6272f062cd1c2413"]
//!
//! [validity]
//! invalid_before = 100
//! invalid_hereafter = 200
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use allegra_contracts::{
    error::{ScriptError, ScriptResult},
    hash::PubKeyHash,
    signer::SignerSet,
    validity::ValidityInterval,
};

use crate::context::TxContext;

/// The top-level structure deserialized from a TOML context file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Hex-encoded public key hashes attested as signers.
    #[serde(default)]
    pub signers: Vec<String>,

    /// Validity interval bounds. Both are optional.
    #[serde(default)]
    pub validity: ValidityInterval,
}

impl ContextConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `ScriptError::ConfigError` if the TOML is malformed or does not
    /// match the expected schema.
    pub fn from_toml_str(s: &str) -> ScriptResult<Self> {
        toml::from_str(s).map_err(|e| ScriptError::ConfigError {
            reason: format!("failed to parse context TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as TOML context configuration.
    pub fn from_file(path: &Path) -> ScriptResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ScriptError::ConfigError {
            reason: format!("failed to read context file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Build the `TxContext` this configuration describes.
    ///
    /// Every signer must be a 56-character hex public key hash; the first bad
    /// entry is reported as `ScriptError::ConfigError`.
    pub fn into_context(self) -> ScriptResult<TxContext> {
        let signers = self
            .signers
            .iter()
            .map(|s| {
                PubKeyHash::from_hex(s).map_err(|e| ScriptError::ConfigError {
                    reason: format!("invalid signer '{}': {}", s, e),
                })
            })
            .collect::<ScriptResult<SignerSet>>()?;

        debug!(
            signers = signers.len(),
            invalid_before = ?self.validity.invalid_before,
            invalid_hereafter = ?self.validity.invalid_hereafter,
            "evaluation context loaded"
        );

        Ok(TxContext::new(signers, self.validity))
    }
}
