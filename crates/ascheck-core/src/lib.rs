//! # ascheck-core — Identifier Primitives for Schema Corpora
//!
//! Every schema document in a corpus is named by an absolute URI
//! (`http://stsci.edu/schemas/asdf/core/ndarray-1.0.0`) and may also carry a
//! tag in one of two surface syntaxes:
//!
//! - colon form: `tag:stsci.edu:asdf/core/ndarray-1.0.0`
//! - bang form, as written inside YAML examples: `!core/ndarray-1.0.0`
//!
//! This crate owns the pure string rules that relate those encodings and
//! that split an identifier into its version-independent *base* and its
//! version suffix. Nothing here touches the filesystem or keeps state.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ascheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identifier;
pub mod namespace;

pub use error::IdentifierError;
pub use identifier::{ref_to_id, split_id, tag_to_id, yaml_tag_to_id, SchemaId, Tag};
pub use namespace::{
    Namespace, ID_PREFIX, METASCHEMA_ID, RESERVED_FILENAME_PREFIX, TAG_PREFIX, VALID_YAML_VERSIONS,
};
