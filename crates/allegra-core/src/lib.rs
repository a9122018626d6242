//! # allegra-core
//!
//! Evaluation contexts and the validation pass for Allegra native scripts.
//!
//! This crate provides:
//! - The context and script traits (`SignatureContext`, `NativeContext`,
//!   `Evaluate`, `Witness`)
//! - `TxContext`, the transaction-backed context, and its TOML loader
//! - `ScriptValidator`, which checks required script hashes against witnesses
//!
//! ## Usage
//!
//! ```rust,ignore
//! use allegra_core::{ContextConfig, ScriptValidator};
//!
//! let ctx = ContextConfig::from_file(Path::new("tx.toml"))?.into_context()?;
//! let report = ScriptValidator::new(&ctx).validate(&required, &witnesses);
//! ```

pub mod config;
pub mod context;
pub mod traits;
pub mod validator;

pub use config::ContextConfig;
pub use context::TxContext;
pub use validator::ScriptValidator;

// ── Tests ─────────────────────────────────────────────────────────────────────
