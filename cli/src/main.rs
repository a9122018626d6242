//! Allegra native script tool.
//!
//! Hashes, converts and evaluates native scripts written in the ledger's JSON
//! form.
//!
//! Usage:
//!   allegra hash script.json
//!   allegra encode script.json
//!   allegra decode 8201838200581c...
//!   allegra eval script.json --context tx.toml

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use allegra_contracts::error::{ScriptError, ScriptResult};
use allegra_core::ContextConfig;
use allegra_script::NativeScript;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Allegra native script tool.
///
/// `<SCRIPT>` arguments are paths to JSON script files; pass `-` to read the
/// script from stdin.
#[derive(Parser)]
#[command(
    name = "allegra",
    about = "Hash, convert and evaluate Allegra native scripts",
    long_about = "Hash, convert and evaluate Allegra native scripts.\n\
                  Scripts are read in the ledger's JSON form; CBOR is read and written as hex."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the script hash (hex).
    Hash { script: PathBuf },
    /// Print the canonical CBOR encoding (hex).
    Encode { script: PathBuf },
    /// Decode hex CBOR and print the script as JSON.
    Decode { cbor_hex: String },
    /// Evaluate a script against a TOML context; exits with 1 when unsatisfied.
    Eval {
        script: PathBuf,
        /// TOML file with `signers` and a `[validity]` table.
        #[arg(long)]
        context: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Hash { script } => run_hash(&script),
        Command::Encode { script } => run_encode(&script),
        Command::Decode { cbor_hex } => run_decode(&cbor_hex),
        Command::Eval { script, context } => run_eval(&script, &context),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_hash(path: &Path) -> ScriptResult<ExitCode> {
    let script = read_script(path)?;
    println!("{}", script.hash());
    Ok(ExitCode::SUCCESS)
}

fn run_encode(path: &Path) -> ScriptResult<ExitCode> {
    let script = read_script(path)?;
    println!("{}", script.to_cbor_hex());
    Ok(ExitCode::SUCCESS)
}

fn run_decode(cbor_hex: &str) -> ScriptResult<ExitCode> {
    let script = NativeScript::from_cbor_hex(cbor_hex)?;
    let pretty = serde_json::to_string_pretty(&script.to_json()).map_err(|e| {
        ScriptError::MalformedJson {
            reason: format!("failed to render script JSON: {}", e),
        }
    })?;
    println!("{}", pretty);
    Ok(ExitCode::SUCCESS)
}

fn run_eval(script_path: &Path, context_path: &Path) -> ScriptResult<ExitCode> {
    let script = read_script(script_path)?;
    let ctx = ContextConfig::from_file(context_path)?.into_context()?;

    let satisfied = script.eval(&ctx);
    info!(
        script_hash = %script.hash(),
        kind = %script.kind(),
        satisfied,
        "script evaluated"
    );

    println!("{}", satisfied);
    Ok(if satisfied {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn read_script(path: &Path) -> ScriptResult<NativeScript> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    NativeScript::from_json_str(&text)
}
