//! Per-file and per-corpus check results.

use std::path::PathBuf;

use serde::Serialize;

use crate::violation::Violation;

/// Outcome of checking one schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    /// The checked file.
    pub path: PathBuf,
    /// Every broken rule, in the order the checks ran.
    pub violations: Vec<Violation>,
}

impl SchemaReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first rule the file broke.
    pub fn first_violation(&self) -> Option<&Violation> {
        self.violations.first()
    }
}

/// Result of checking every schema in a corpus.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusReport {
    /// Number of schema files checked.
    pub total: usize,
    /// Number that passed every check.
    pub passed: usize,
    /// Number with at least one violation.
    pub failed: usize,
    /// One report per file, in discovery order.
    pub reports: Vec<SchemaReport>,
}

impl CorpusReport {
    /// Summarise a list of per-file reports.
    pub fn from_reports(reports: Vec<SchemaReport>) -> Self {
        let passed = reports.iter().filter(|r| r.passed()).count();
        Self {
            total: reports.len(),
            passed,
            failed: reports.len() - passed,
            reports,
        }
    }

    /// Reports of files with at least one violation.
    pub fn failures(&self) -> impl Iterator<Item = &SchemaReport> {
        self.reports.iter().filter(|r| !r.passed())
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
