//! # Envelope Rules
//!
//! Formatting rules that do not depend on other documents: the file name,
//! the `%YAML` header and `...` footer framing, and the required top-level
//! keys. Each check appends to a violation list rather than returning
//! early, so one pass reports everything wrong with the envelope.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::{file_name, Node, SchemaDocument};
use crate::violation::Violation;

/// Anchored at the start only: the name must begin with
/// `<name>-<major>.<minor>.<patch>.yaml`.
static SCHEMA_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+-[0-9]+\.[0-9]+\.[0-9]+\.yaml").unwrap());

/// Required closing line of every schema file.
pub const YAML_FOOTER: &str = "\n...\n";

/// True if `name` is an acceptable schema file name.
pub fn is_valid_filename(name: &str) -> bool {
    SCHEMA_FILENAME_RE.is_match(name)
}

/// File name must be lowercase `name-X.Y.Z.yaml`.
pub fn check_filename(path: &Path, violations: &mut Vec<Violation>) {
    let file = file_name(path);
    if !is_valid_filename(&file) {
        violations.push(Violation::InvalidFilename { file });
    }
}

/// Content must open with `%YAML <version>\n---\n` for an accepted version
/// and close with `\n...\n`.
pub fn check_framing(
    path: &Path,
    content: &str,
    yaml_versions: &[String],
    violations: &mut Vec<Violation>,
) {
    let has_header = yaml_versions
        .iter()
        .any(|v| content.starts_with(&format!("%YAML {v}\n---\n")));
    if !has_header {
        violations.push(Violation::MissingYamlHeader {
            file: file_name(path),
            accepted: yaml_versions.join(", "),
        });
    }
    if !content.ends_with(YAML_FOOTER) {
        violations.push(Violation::MissingYamlFooter {
            file: file_name(path),
        });
    }
}

/// `$schema` must be present and equal `metaschema_id`.
pub fn check_metaschema(doc: &SchemaDocument, metaschema_id: &str, violations: &mut Vec<Violation>) {
    match doc.get("$schema") {
        None => violations.push(Violation::MissingKey {
            file: doc.file_name(),
            key: "$schema".to_string(),
        }),
        Some(node) if node.as_str() == Some(metaschema_id) => {}
        Some(node) => violations.push(Violation::WrongMetaschema {
            file: doc.file_name(),
            expected: metaschema_id.to_string(),
            actual: node.describe(),
        }),
    }
}

/// `key` must be present and hold a string.
///
/// Returns true if the key holds a string, so callers can skip checks that
/// depend on it.
pub fn check_string_key(doc: &SchemaDocument, key: &str, violations: &mut Vec<Violation>) -> bool {
    match doc.get(key) {
        None => {
            violations.push(Violation::MissingKey {
                file: doc.file_name(),
                key: key.to_string(),
            });
            false
        }
        Some(node) => check_string_node(doc, key, node, violations),
    }
}

/// If `key` is present it must hold a string. An absent key is fine.
pub fn check_optional_string_key(doc: &SchemaDocument, key: &str, violations: &mut Vec<Violation>) {
    if let Some(node) = doc.get(key) {
        check_string_node(doc, key, node, violations);
    }
}

fn check_string_node(
    doc: &SchemaDocument,
    key: &str,
    node: &Node,
    violations: &mut Vec<Violation>,
) -> bool {
    if node.as_str().is_some() {
        return true;
    }
    violations.push(Violation::WrongType {
        file: doc.file_name(),
        key: key.to_string(),
        found: node.kind().to_string(),
    });
    false
}

/// `key` must be present and hold a string with non-whitespace content.
pub fn check_text_field(doc: &SchemaDocument, key: &str, violations: &mut Vec<Violation>) {
    if !check_string_key(doc, key, violations) {
        return;
    }
    if doc.get_str(key).is_some_and(|s| s.trim().is_empty()) {
        violations.push(Violation::EmptyField {
            file: doc.file_name(),
            field: key.to_string(),
        });
    }
}
