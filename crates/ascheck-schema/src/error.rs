//! # Error Types
//!
//! Operational errors only. A schema that breaks a corpus rule is not an
//! error here: it produces a [`Violation`](crate::Violation) in its report.
//! The types below cover inputs that could not be read, parsed or resolved
//! at all.

use std::path::PathBuf;

use ascheck_core::IdentifierError;
use thiserror::Error;

/// Error loading a schema file into a [`SchemaDocument`](crate::SchemaDocument).
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The top level of the document is not a mapping.
    #[error("top level must be a mapping, found {found}")]
    NotAMapping {
        /// Kind of node found instead.
        found: &'static str,
    },

    /// A mapping key is not a string, number or boolean.
    #[error("unsupported mapping key type: {0}")]
    UnsupportedKey(String),

    /// The tree nests deeper than [`MAX_NESTING_DEPTH`](crate::document::MAX_NESTING_DEPTH).
    #[error("document nests deeper than {max_depth} levels")]
    TooDeep {
        /// The configured limit.
        max_depth: usize,
    },

    /// The `examples` key does not hold a sequence of `[name, text, ...]` entries.
    #[error("malformed examples: {0}")]
    MalformedExamples(String),

    /// A `$ref` could not be resolved against the document identifier.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
}

/// Error returned by a [`Resolver`](crate::Resolver).
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The key is in no namespace the resolver knows about.
    #[error("no resolver mapping for '{0}'")]
    UnknownKey(String),

    /// The key looked like a tag but could not be mapped to an identifier.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// The resolver's root directory is unusable.
    #[error("invalid resolver root {path}: {reason}")]
    InvalidRoot {
        /// The configured root.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// A location could not be expressed as a URL.
    #[error("cannot express {0} as a file URL")]
    InvalidLocation(PathBuf),
}

/// Error loading checker configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`CheckConfig`](crate::CheckConfig).
    #[error("invalid config {path}: {reason}")]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}

/// Error discovering or loading a corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The corpus root is not a directory.
    #[error("corpus root {0} is not a directory")]
    NotADirectory(PathBuf),

    /// IO error while walking the corpus.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
