//! # ascheck-schema — Reference Consistency Checking for Schema Corpora
//!
//! Loads a directory tree of versioned YAML schema documents and verifies
//! that each one is well formed and self-consistent.
//!
//! ## Document Model (`document`)
//!
//! [`SchemaDocument`] wraps the parsed YAML as an explicit [`Node`] tree and
//! extracts the three reference kinds a schema can hold: `$ref` values, bang
//! tags inside `examples`, and `(ref:...)` expressions inside `description`.
//!
//! ## Rules (`envelope`, `check`)
//!
//! [`SchemaChecker`] runs every rule against one file and returns a
//! [`SchemaReport`] listing each [`Violation`] in rule order. Location checks
//! go through the injected [`Resolver`], so the crate never guesses where a
//! schema should live.
//!
//! ## Corpus (`corpus`, `index`)
//!
//! [`Corpus`] discovers and loads every schema under a root and checks them
//! all. [`CorpusIndex`] backs the opt-in uniqueness and dangling-`$ref`
//! rules.
//!
//! ## Crate Policy
//!
//! - Depends only on `ascheck-core` internally.
//! - Checking never panics and never stops at the first broken rule.
//! - File reads happen once per schema per run.

pub mod check;
pub mod config;
pub mod corpus;
pub mod document;
pub mod envelope;
pub mod error;
pub mod index;
pub mod report;
pub mod resolver;
pub mod violation;

pub use check::{assert_schema_correct, SchemaChecker};
pub use config::{CheckConfig, ENV_CHECK_REFS, ENV_STRICT_UNIQUENESS};
pub use corpus::{list_schema_paths, Corpus, SourceFile};
pub use document::{
    list_description_ids, list_example_ids, list_refs, Node, Reference, ReferenceKind, Scalar,
    SchemaDocument, MAX_NESTING_DEPTH,
};
pub use error::{ConfigError, CorpusError, DocumentError, ResolveError};
pub use index::{id_to_schema, tag_to_schema, CorpusIndex};
pub use report::{CorpusReport, SchemaReport};
pub use resolver::{location_to_path, same_file, DirectoryResolver, Resolver, StaticResolver};
pub use violation::Violation;
