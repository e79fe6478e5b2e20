//! # Refs Subcommand
//!
//! Prints every outgoing reference of one schema: `$ref` targets, tags used
//! in examples, and `(ref:...)` expressions in the description.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ascheck_schema::{CheckConfig, SchemaDocument};

use crate::check::OutputFormat;

/// Arguments for the `ascheck refs` subcommand.
#[derive(Args, Debug)]
pub struct RefsArgs {
    /// Schema file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the refs subcommand. Always returns exit code 0 on success.
pub fn run_refs(args: &RefsArgs, config: &CheckConfig) -> Result<u8> {
    let doc = SchemaDocument::load(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let references = doc
        .references(&config.namespace())
        .with_context(|| format!("failed to extract references from {}", args.file.display()))?;
    tracing::debug!(count = references.len(), "extracted references");

    match args.format {
        OutputFormat::Text => {
            for reference in &references {
                println!("{:<16} {}", reference.kind, reference.target);
            }
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&references).context("failed to serialize references")?
        ),
    }
    Ok(0)
}
