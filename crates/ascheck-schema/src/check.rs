//! # Reference Consistency Checker
//!
//! Runs every rule against one schema file, in a fixed order:
//!
//! 1. file name and `%YAML` / `...` framing (on the raw text)
//! 2. `$schema`, then `id`
//! 3. `id` resolves back to this file, then `tag` (if declared) does too
//! 4. `title` and `description` have content
//! 5. strict mode only: `id`/`tag` unique in the corpus, `$ref`s point at
//!    declared schemas
//! 6. no example embeds a tag for another version of this schema
//! 7. no description `(ref:...)` names another version of this schema
//!
//! All rules run; the report keeps every violation in this order, so its
//! first entry is the first rule broken. Rules that need a valid `id` are
//! skipped when the id is missing.
//!
//! References to schemas with a different base name are never flagged as
//! stale: only references back to the document's own base are checked.

use std::path::Path;

use ascheck_core::{split_id, Namespace, SchemaId};

use crate::config::CheckConfig;
use crate::corpus::SourceFile;
use crate::document::{list_description_ids, list_example_ids, SchemaDocument};
use crate::envelope;
use crate::error::DocumentError;
use crate::index::CorpusIndex;
use crate::report::SchemaReport;
use crate::resolver::{location_to_path, same_file, Resolver};
use crate::violation::Violation;

/// Checks schema files against the corpus rules.
///
/// Holds only shared references, so one checker can be reused for every
/// file of a run.
pub struct SchemaChecker<'a> {
    resolver: &'a dyn Resolver,
    config: &'a CheckConfig,
    namespace: Namespace,
    index: Option<&'a CorpusIndex<'a>>,
}

impl<'a> SchemaChecker<'a> {
    pub fn new(resolver: &'a dyn Resolver, config: &'a CheckConfig) -> Self {
        Self {
            resolver,
            config,
            namespace: config.namespace(),
            index: None,
        }
    }

    /// Enable the corpus-wide rules, which need an index of every document.
    pub fn with_index(mut self, index: &'a CorpusIndex<'a>) -> Self {
        self.index = Some(index);
        self
    }

    /// Read and check the schema at `path`.
    pub fn check_file(&self, path: &Path) -> SchemaReport {
        self.check_source(&SourceFile::read(path))
    }

    /// Check an already-read schema file.
    pub fn check_source(&self, source: &SourceFile) -> SchemaReport {
        let mut violations = Vec::new();
        envelope::check_filename(&source.path, &mut violations);

        match (&source.content, &source.document) {
            (None, document) => {
                let reason = match document {
                    Err(e) => e.to_string(),
                    Ok(_) => "no content".to_string(),
                };
                violations.push(Violation::Unreadable {
                    file: source.file_name(),
                    reason,
                });
            }
            (Some(content), document) => {
                envelope::check_framing(
                    &source.path,
                    content,
                    &self.config.yaml_versions,
                    &mut violations,
                );
                match document {
                    Ok(doc) => self.check_document(doc, &mut violations),
                    Err(e) => violations.push(Violation::Unparseable {
                        file: source.file_name(),
                        reason: e.to_string(),
                    }),
                }
            }
        }

        tracing::debug!(
            path = %source.path.display(),
            violations = violations.len(),
            "checked schema"
        );
        SchemaReport {
            path: source.path.clone(),
            violations,
        }
    }

    /// Run every content rule against a parsed document.
    pub fn check_document(&self, doc: &SchemaDocument, violations: &mut Vec<Violation>) {
        envelope::check_metaschema(doc, &self.config.metaschema_id, violations);

        let id = if envelope::check_string_key(doc, "id", violations) {
            doc.schema_id()
        } else {
            None
        };

        if let Some(id) = &id {
            if let Some(actual) = self.mismatched_location(doc, id.as_str()) {
                violations.push(Violation::IdResolution {
                    file: doc.file_name(),
                    id: id.to_string(),
                    actual,
                });
            }
        }

        envelope::check_optional_string_key(doc, "tag", violations);
        if let Some(tag) = doc.tag() {
            if let Some(actual) = self.mismatched_location(doc, tag.as_str()) {
                violations.push(Violation::TagResolution {
                    file: doc.file_name(),
                    tag: tag.to_string(),
                    actual,
                });
            }
        }

        envelope::check_text_field(doc, "title", violations);
        envelope::check_text_field(doc, "description", violations);

        let Some(id) = id else {
            return;
        };
        self.check_uniqueness(doc, &id, violations);
        self.check_dangling_refs(doc, &id, violations);
        self.check_example_staleness(doc, &id, violations);
        self.check_description_staleness(doc, &id, violations);
    }

    /// `None` if `key` resolves to the document's own file, otherwise the
    /// location it resolved to (or why it did not resolve).
    fn mismatched_location(&self, doc: &SchemaDocument, key: &str) -> Option<String> {
        match self.resolver.resolve(key) {
            Ok(location) => {
                if same_file(doc.path(), &location_to_path(&location)) {
                    None
                } else {
                    Some(location)
                }
            }
            Err(e) => Some(format!("nothing ({e})")),
        }
    }

    fn check_uniqueness(&self, doc: &SchemaDocument, id: &SchemaId, violations: &mut Vec<Violation>) {
        let Some(index) = self.index.filter(|_| self.config.strict_uniqueness) else {
            return;
        };
        let count = index.owners_of_id(id.as_str()).len();
        if count > 1 {
            violations.push(Violation::DuplicateId {
                file: doc.file_name(),
                id: id.to_string(),
                count,
            });
        }
        if let Some(tag) = doc.tag() {
            let count = index.owners_of_tag(tag.as_str()).len();
            if count > 1 {
                violations.push(Violation::DuplicateTag {
                    file: doc.file_name(),
                    tag: tag.to_string(),
                    count,
                });
            }
        }
    }

    fn check_dangling_refs(&self, doc: &SchemaDocument, id: &SchemaId, violations: &mut Vec<Violation>) {
        let Some(index) = self.index.filter(|_| self.config.check_refs) else {
            return;
        };
        for reference in doc.refs() {
            match id.join(reference) {
                Ok(joined) => {
                    let target = joined.split_once('#').map_or(joined.as_str(), |(t, _)| t);
                    if self.namespace.owns(target) && !index.contains_id(target) {
                        violations.push(Violation::DanglingRef {
                            file: doc.file_name(),
                            reference: reference.to_string(),
                            target: target.to_string(),
                        });
                    }
                }
                Err(e) => violations.push(Violation::InvalidRef {
                    file: doc.file_name(),
                    reference: reference.to_string(),
                    reason: e.to_string(),
                }),
            }
        }
    }

    fn check_example_staleness(
        &self,
        doc: &SchemaDocument,
        id: &SchemaId,
        violations: &mut Vec<Violation>,
    ) {
        match list_example_ids(doc, &self.namespace) {
            Ok(example_ids) => {
                for example_id in example_ids {
                    if id.is_other_version_of(&example_id) {
                        violations.push(Violation::OutdatedExampleRef {
                            file: doc.file_name(),
                            example_id,
                            current_id: id.to_string(),
                        });
                    }
                }
            }
            Err(e) => {
                let reason = match e {
                    DocumentError::MalformedExamples(reason) => reason,
                    other => other.to_string(),
                };
                violations.push(Violation::MalformedExamples {
                    file: doc.file_name(),
                    reason,
                });
            }
        }
    }

    fn check_description_staleness(
        &self,
        doc: &SchemaDocument,
        id: &SchemaId,
        violations: &mut Vec<Violation>,
    ) {
        for reference in list_description_ids(doc, &self.namespace) {
            // Unversioned refs are version-independent and never stale.
            if split_id(&reference).1.is_none() {
                continue;
            }
            if id.is_other_version_of(&reference) {
                violations.push(Violation::OutdatedDescriptionRef {
                    file: doc.file_name(),
                    reference,
                    current_id: id.to_string(),
                });
            }
        }
    }
}

/// Check one file with the default configuration and fail on the first
/// broken rule.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
pub fn assert_schema_correct(path: &Path, resolver: &dyn Resolver) -> Result<(), Violation> {
    let config = CheckConfig::default();
    let report = SchemaChecker::new(resolver, &config).check_file(path);
    match report.violations.into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}
