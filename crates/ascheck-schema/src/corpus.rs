//! # Corpus Discovery and Checking
//!
//! Finds every `*.yaml` schema under a root directory, reads and parses each
//! once, and runs the checker over all of them. Files whose name starts with
//! the reserved prefix (`version_map-` by default) are not schemas and are
//! skipped.

use std::path::{Path, PathBuf};

use crate::check::SchemaChecker;
use crate::config::CheckConfig;
use crate::document::{file_name, SchemaDocument};
use crate::error::{CorpusError, DocumentError};
use crate::index::CorpusIndex;
use crate::report::CorpusReport;
use crate::resolver::Resolver;

/// Every schema file under `root`, recursively, sorted by path.
///
/// # Errors
///
/// [`CorpusError::NotADirectory`] if `root` is not a directory, or
/// [`CorpusError::Io`] if it cannot be listed. Unreadable subdirectories
/// are logged and skipped.
pub fn list_schema_paths(root: &Path, reserved_prefix: &str) -> Result<Vec<PathBuf>, CorpusError> {
    if !root.is_dir() {
        return Err(CorpusError::NotADirectory(root.to_path_buf()));
    }
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(root)? {
        visit(entry?.path(), reserved_prefix, &mut paths);
    }
    paths.sort();
    Ok(paths)
}

fn visit(path: PathBuf, reserved_prefix: &str, acc: &mut Vec<PathBuf>) {
    if path.is_dir() {
        let entries = match std::fs::read_dir(&path) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %path.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };
        for entry in entries {
            match entry {
                Ok(entry) => visit(entry.path(), reserved_prefix, acc),
                Err(e) => {
                    tracing::warn!(dir = %path.display(), error = %e, "failed to read directory entry");
                }
            }
        }
        return;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return;
    };
    if name.ends_with(".yaml") && !name.starts_with(reserved_prefix) {
        acc.push(path);
    }
}

/// One schema file: its raw text (if readable) and the parse result.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: Option<String>,
    pub document: Result<SchemaDocument, DocumentError>,
}

impl SourceFile {
    /// Read and parse `path`. Never fails: read and parse errors are kept
    /// in `document` and reported as violations by the checker.
    pub fn read(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_content(path, content),
            Err(source) => Self {
                path: path.to_path_buf(),
                content: None,
                document: Err(DocumentError::Read {
                    path: path.to_path_buf(),
                    source,
                }),
            },
        }
    }

    /// Parse text already in memory as if it were read from `path`.
    pub fn from_content(path: &Path, content: String) -> Self {
        let document = SchemaDocument::parse(path, &content);
        Self {
            path: path.to_path_buf(),
            content: Some(content),
            document,
        }
    }

    pub fn file_name(&self) -> String {
        file_name(&self.path)
    }
}

/// Every schema under one root, loaded once.
#[derive(Debug)]
pub struct Corpus {
    sources: Vec<SourceFile>,
}

impl Corpus {
    /// Discover and read every schema under `root`.
    ///
    /// # Errors
    ///
    /// See [`list_schema_paths`]. Individual files that fail to read or
    /// parse do not fail the load.
    pub fn load(root: &Path, config: &CheckConfig) -> Result<Self, CorpusError> {
        let paths = list_schema_paths(root, &config.reserved_prefix)?;
        let sources: Vec<SourceFile> = paths.iter().map(|p| SourceFile::read(p)).collect();
        let unparsed = sources.iter().filter(|s| s.document.is_err()).count();
        tracing::info!(
            root = %root.display(),
            schemas = sources.len(),
            unparsed,
            "loaded schema corpus"
        );
        Ok(Self { sources })
    }

    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Successfully parsed documents, in path order.
    pub fn documents(&self) -> impl Iterator<Item = &SchemaDocument> + Clone {
        self.sources.iter().filter_map(|s| s.document.as_ref().ok())
    }

    /// Identifier and tag lookup tables over the parsed documents.
    pub fn index(&self) -> CorpusIndex<'_> {
        CorpusIndex::build(self.documents())
    }

    /// Check every file and summarise.
    pub fn check(&self, resolver: &dyn Resolver, config: &CheckConfig) -> CorpusReport {
        let index = self.index();
        let checker = SchemaChecker::new(resolver, config).with_index(&index);
        let reports = self
            .sources
            .iter()
            .map(|source| checker.check_source(source))
            .collect();
        let report = CorpusReport::from_reports(reports);
        tracing::info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            "corpus check complete"
        );
        report
    }
}
