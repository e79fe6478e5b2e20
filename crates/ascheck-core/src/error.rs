//! # Error Types
//!
//! Identifier conversion is pure string rewriting, so the only failures are
//! inputs outside the expected namespace and URIs that cannot be joined.

use thiserror::Error;

/// Error converting between tag, identifier and reference encodings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// A colon-form tag did not start with the required namespace prefix.
    #[error("tag '{tag}' does not start with '{expected_prefix}'")]
    MissingTagPrefix {
        /// The offending tag.
        tag: String,
        /// The prefix every colon-form tag must carry.
        expected_prefix: String,
    },

    /// A schema identifier or `$ref` could not be parsed or joined as a URI.
    #[error("invalid URI '{uri}': {reason}")]
    InvalidUri {
        /// The URI (or base + reference pair) that failed.
        uri: String,
        /// Parser message.
        reason: String,
    },
}
