//! # Violations
//!
//! One variant per corpus rule. Each carries the file name and, where it
//! applies, the expected and actual values, so the rendered message is
//! enough to fix the schema without rerunning anything.

use serde::Serialize;
use thiserror::Error;

/// A broken corpus rule in one schema file.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    #[error("{file} is an invalid schema filename")]
    InvalidFilename { file: String },

    #[error("{file} could not be read: {reason}")]
    Unreadable { file: String, reason: String },

    #[error("{file} must start with a %YAML directive with a supported version ({accepted})")]
    MissingYamlHeader { file: String, accepted: String },

    #[error("{file} must end with '...' followed by a single newline")]
    MissingYamlFooter { file: String },

    #[error("{file} is not a valid schema document: {reason}")]
    Unparseable { file: String, reason: String },

    #[error("{file} is missing {key} key")]
    MissingKey { file: String, key: String },

    #[error("{file} has wrong $schema value (expected {expected}, found {actual})")]
    WrongMetaschema {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("{file} {field} must have content")]
    EmptyField { file: String, field: String },

    #[error("{file} {key} must be a string, found {found}")]
    WrongType {
        file: String,
        key: String,
        found: String,
    },

    #[error("{file}: id {id} resolves to {actual}, not to this file")]
    IdResolution {
        file: String,
        id: String,
        actual: String,
    },

    #[error("{file}: tag {tag} resolves to {actual}, not to this file")]
    TagResolution {
        file: String,
        tag: String,
        actual: String,
    },

    #[error("{file} does not have a unique id: {id} is declared by {count} schemas")]
    DuplicateId {
        file: String,
        id: String,
        count: usize,
    },

    #[error("{file} does not have a unique tag: {tag} is declared by {count} schemas")]
    DuplicateTag {
        file: String,
        tag: String,
        count: usize,
    },

    #[error("{file} has a $ref '{reference}' to {target}, which no schema declares")]
    DanglingRef {
        file: String,
        reference: String,
        target: String,
    },

    #[error("{file} has a $ref '{reference}' that cannot be resolved: {reason}")]
    InvalidRef {
        file: String,
        reference: String,
        reason: String,
    },

    #[error("{file} has malformed examples: {reason}")]
    MalformedExamples { file: String, reason: String },

    #[error("{file} contains an example with an outdated tag: {example_id} (current id {current_id})")]
    OutdatedExampleRef {
        file: String,
        example_id: String,
        current_id: String,
    },

    #[error("{file} description contains an outdated ref: {reference} (current id {current_id})")]
    OutdatedDescriptionRef {
        file: String,
        reference: String,
        current_id: String,
    },
}

impl Violation {
    /// Stable rule name, matching the serialized `rule` field.
    pub fn rule(&self) -> &'static str {
        match self {
            Violation::InvalidFilename { .. } => "invalid_filename",
            Violation::Unreadable { .. } => "unreadable",
            Violation::MissingYamlHeader { .. } => "missing_yaml_header",
            Violation::MissingYamlFooter { .. } => "missing_yaml_footer",
            Violation::Unparseable { .. } => "unparseable",
            Violation::MissingKey { .. } => "missing_key",
            Violation::WrongMetaschema { .. } => "wrong_metaschema",
            Violation::EmptyField { .. } => "empty_field",
            Violation::WrongType { .. } => "wrong_type",
            Violation::IdResolution { .. } => "id_resolution",
            Violation::TagResolution { .. } => "tag_resolution",
            Violation::DuplicateId { .. } => "duplicate_id",
            Violation::DuplicateTag { .. } => "duplicate_tag",
            Violation::DanglingRef { .. } => "dangling_ref",
            Violation::InvalidRef { .. } => "invalid_ref",
            Violation::MalformedExamples { .. } => "malformed_examples",
            Violation::OutdatedExampleRef { .. } => "outdated_example_ref",
            Violation::OutdatedDescriptionRef { .. } => "outdated_description_ref",
        }
    }
}
