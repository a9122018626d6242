//! Error types for native script decoding, evaluation and validation.
//!
//! All fallible operations in the workspace return `ScriptResult<T>`.
//! Decoders are all-or-nothing: an error means no script value was built.

use thiserror::Error;

/// The unified error type for native script handling.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The bytes are not a CBOR-encoded native script of a known shape.
    #[error("malformed native script CBOR: {reason}")]
    MalformedCbor { reason: String },

    /// The JSON document is missing a required field or carries a value of
    /// the wrong type.
    #[error("malformed native script JSON: {reason}")]
    MalformedJson { reason: String },

    /// A hash wrapper was given the wrong number of bytes or invalid hex.
    #[error("invalid hash: {reason}")]
    InvalidHash { reason: String },

    /// An evaluation context configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A validation pass found at least one required script unsatisfied.
    #[error("script validation failed: {reason}")]
    ValidationFailed { reason: String },

    /// Reading script or context input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the Allegra crates.
pub type ScriptResult<T> = Result<T, ScriptError>;
