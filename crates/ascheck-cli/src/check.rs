//! # Check Subcommand
//!
//! Loads every schema under a corpus root, checks each one, and prints a
//! per-file report followed by a summary.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use ascheck_schema::{CheckConfig, Corpus, CorpusReport, DirectoryResolver};

/// Arguments for the `ascheck check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Root directory of the schema corpus.
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Directory identifiers and tags resolve into. Defaults to ROOT.
    #[arg(long, value_name = "DIR")]
    pub resolver_root: Option<PathBuf>,

    /// Fail schemas whose id or tag is declared more than once.
    #[arg(long)]
    pub strict_uniqueness: bool,

    /// Fail schemas with a $ref to an identifier no schema declares.
    #[arg(long)]
    pub check_refs: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if every schema passed, 1 if any failed. Operational
/// errors (missing root, bad resolver root) are returned as `Err`.
pub fn run_check(args: &CheckArgs, mut config: CheckConfig) -> Result<u8> {
    config.strict_uniqueness |= args.strict_uniqueness;
    config.check_refs |= args.check_refs;

    let resolver_root = args.resolver_root.as_deref().unwrap_or(args.root.as_path());
    let resolver = DirectoryResolver::with_namespace(resolver_root, config.namespace())
        .with_context(|| format!("failed to set up resolver at {}", resolver_root.display()))?;
    tracing::debug!(root = %resolver.root().display(), "resolving into directory");

    let corpus = Corpus::load(&args.root, &config)
        .with_context(|| format!("failed to load schemas from {}", args.root.display()))?;
    let report = corpus.check(&resolver, &config);

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report, &args.root)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        ),
    }

    Ok(if report.is_success() { 0 } else { 1 })
}

/// One `PASS`/`FAIL` line per schema, each violation indented below its
/// file, then a summary line.
pub fn render_text(report: &CorpusReport, root: &Path) -> String {
    let mut out = String::new();
    for schema in &report.reports {
        let rel = schema.path.strip_prefix(root).unwrap_or(&schema.path);
        if schema.passed() {
            let _ = writeln!(out, "  PASS: {}", rel.display());
        } else {
            let _ = writeln!(out, "  FAIL: {}", rel.display());
            for violation in &schema.violations {
                let _ = writeln!(out, "        {violation}");
            }
        }
    }
    let _ = writeln!(out, "Schemas: {}/{} passed", report.passed, report.total);
    if report.failed > 0 {
        let _ = writeln!(
            out,
            "\n{} schema(s) failed checks out of {} total.",
            report.failed, report.total
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_schema(root: &Path, name: &str, description: &str) {
        let path = root.join(format!("{name}.yaml"));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            path,
            format!(
                "%YAML 1.1\n---\n$schema: http://stsci.edu/schemas/yaml-schema/draft-01\n\
                 id: http://stsci.edu/schemas/asdf/{name}\ntitle: t\ndescription: {description}\n...\n"
            ),
        )
        .unwrap();
    }

    fn args(root: &Path) -> CheckArgs {
        CheckArgs {
            root: root.to_path_buf(),
            resolver_root: None,
            strict_uniqueness: false,
            check_refs: false,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn passing_corpus_returns_0() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), "core/a-1.0.0", "Fine.");
        assert_eq!(run_check(&args(dir.path()), CheckConfig::default()).unwrap(), 0);
    }

    #[test]
    fn failing_corpus_returns_1() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), "core/a-1.0.0", "Old (ref:core/a-0.1.0).");
        let mut args = args(dir.path());
        args.format = OutputFormat::Json;
        assert_eq!(run_check(&args, CheckConfig::default()).unwrap(), 1);
    }

    #[test]
    fn flags_enable_strict_checks() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), "core/a-1.0.0", "Fine.");
        std::fs::write(
            dir.path().join("core/a-1.0.0.yaml"),
            "%YAML 1.1\n---\n$schema: http://stsci.edu/schemas/yaml-schema/draft-01\n\
             id: http://stsci.edu/schemas/asdf/core/a-1.0.0\ntitle: t\ndescription: d\n\
             properties:\n  x:\n    $ref: b-1.0.0\n...\n",
        )
        .unwrap();
        assert_eq!(run_check(&args(dir.path()), CheckConfig::default()).unwrap(), 0);
        let mut strict = args(dir.path());
        strict.check_refs = true;
        assert_eq!(run_check(&strict, CheckConfig::default()).unwrap(), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_check(&args(&dir.path().join("absent")), CheckConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("absent"));
    }

    #[test]
    fn text_report_lists_failures_with_reasons() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), "core/a-1.0.0", "Fine.");
        write_schema(dir.path(), "core/b-1.0.0", "Old (ref:core/b-0.1.0).");
        let config = CheckConfig::default();
        let corpus = Corpus::load(dir.path(), &config).unwrap();
        let resolver = DirectoryResolver::new(dir.path()).unwrap();
        let text = render_text(&corpus.check(&resolver, &config), dir.path());
        assert!(text.contains("PASS: core/a-1.0.0.yaml"), "{text}");
        assert!(text.contains("FAIL: core/b-1.0.0.yaml"), "{text}");
        assert!(text.contains("outdated ref"), "{text}");
        assert!(text.contains("Schemas: 1/2 passed"), "{text}");
    }
}
