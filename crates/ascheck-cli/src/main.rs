//! # ascheck CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ascheck_cli::check::{run_check, CheckArgs};
use ascheck_cli::load_config;
use ascheck_cli::refs::{run_refs, RefsArgs};

/// Reference consistency checker for versioned YAML schema corpora.
///
/// Verifies that every schema is well formed, that its id and tag resolve
/// back to the file itself, and that it never references an older or newer
/// version of itself.
#[derive(Parser, Debug)]
#[command(name = "ascheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every schema under a corpus root.
    Check(CheckArgs),

    /// List the outgoing references of one schema.
    Refs(RefsArgs),
}

/// Exit code for operational errors, distinct from a failed check (1).
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "ascheck starting");

    let result = load_config(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Check(args) => run_check(args, config),
        Commands::Refs(args) => run_refs(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascheck_cli::check::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parse_check_defaults() {
        let cli = Cli::try_parse_from(["ascheck", "check", "schemas"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.root, PathBuf::from("schemas"));
            assert!(args.resolver_root.is_none());
            assert!(!args.strict_uniqueness);
            assert!(!args.check_refs);
            assert_eq!(args.format, OutputFormat::Text);
        } else {
            panic!("expected check subcommand");
        }
    }

    #[test]
    fn cli_parse_check_with_all_options() {
        let cli = Cli::try_parse_from([
            "ascheck",
            "-vv",
            "--config",
            "ascheck.yaml",
            "check",
            "schemas",
            "--resolver-root",
            "resolved",
            "--strict-uniqueness",
            "--check-refs",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("ascheck.yaml")));
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.resolver_root, Some(PathBuf::from("resolved")));
            assert!(args.strict_uniqueness);
            assert!(args.check_refs);
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("expected check subcommand");
        }
    }

    #[test]
    fn cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ascheck", "check", "schemas", "-v", "--config", "c.yaml"])
            .unwrap();
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
    }

    #[test]
    fn cli_parse_refs() {
        let cli = Cli::try_parse_from(["ascheck", "refs", "core/ndarray-1.0.0.yaml"]).unwrap();
        if let Commands::Refs(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("core/ndarray-1.0.0.yaml"));
        } else {
            panic!("expected refs subcommand");
        }
    }

    #[test]
    fn cli_rejects_missing_root_and_unknown_format() {
        assert!(Cli::try_parse_from(["ascheck", "check"]).is_err());
        assert!(Cli::try_parse_from(["ascheck", "check", "s", "--format", "xml"]).is_err());
        assert!(Cli::try_parse_from(["ascheck"]).is_err());
    }
}
