//! # Namespace Constants
//!
//! Fixed prefixes of the ASDF schema namespace, plus a [`Namespace`] value
//! that carries them at runtime so a corpus living under a different
//! organisation's URIs can be checked with the same rules.

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Prefix of every canonical schema identifier.
pub const ID_PREFIX: &str = "http://stsci.edu/schemas/asdf/";

/// Prefix every colon-form tag must carry.
pub const TAG_PREFIX: &str = "tag:stsci.edu:asdf/";

/// The only accepted value of a schema's `$schema` key.
pub const METASCHEMA_ID: &str = "http://stsci.edu/schemas/yaml-schema/draft-01";

/// Versions accepted in the leading `%YAML <version>` directive.
pub const VALID_YAML_VERSIONS: &[&str] = &["1.1"];

/// Files whose name starts with this prefix are never treated as schemas.
pub const RESERVED_FILENAME_PREFIX: &str = "version_map-";

/// Identifier and tag prefixes used to translate between encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Prefix of canonical identifiers, e.g. `http://stsci.edu/schemas/asdf/`.
    pub id_prefix: String,
    /// Prefix of colon-form tags, e.g. `tag:stsci.edu:asdf/`.
    pub tag_prefix: String,
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            id_prefix: ID_PREFIX.to_string(),
            tag_prefix: TAG_PREFIX.to_string(),
        }
    }
}

impl Namespace {
    /// Map a colon-form tag to its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::MissingTagPrefix`] if `tag` does not start
    /// with this namespace's tag prefix.
    pub fn tag_to_id(&self, tag: &str) -> Result<String, IdentifierError> {
        rewrite_tag(tag, &self.tag_prefix, &self.id_prefix)
    }

    /// Map a bang-form tag (`!core/ndarray-1.0.0`) to its identifier.
    pub fn yaml_tag_to_id(&self, yaml_tag: &str) -> String {
        rewrite_yaml_tag(yaml_tag, &self.id_prefix)
    }

    /// Turn the body of a `(ref:...)` expression into an absolute identifier.
    ///
    /// Anything already starting with `http:` is taken as absolute.
    pub fn qualify(&self, reference: &str) -> String {
        if reference.starts_with("http:") {
            reference.to_string()
        } else {
            format!("{}{reference}", self.id_prefix)
        }
    }

    /// True if `uri` lives under this namespace's identifier prefix.
    pub fn owns(&self, uri: &str) -> bool {
        uri.starts_with(&self.id_prefix)
    }
}

pub(crate) fn rewrite_tag(
    tag: &str,
    tag_prefix: &str,
    id_prefix: &str,
) -> Result<String, IdentifierError> {
    if !tag.starts_with(tag_prefix) {
        return Err(IdentifierError::MissingTagPrefix {
            tag: tag.to_string(),
            expected_prefix: tag_prefix.to_string(),
        });
    }
    // Text after the last occurrence of the prefix.
    let suffix = tag.rsplit_once(tag_prefix).map_or("", |(_, rest)| rest);
    Ok(format!("{id_prefix}{suffix}"))
}

pub(crate) fn rewrite_yaml_tag(yaml_tag: &str, id_prefix: &str) -> String {
    format!("{id_prefix}{}", yaml_tag.replace('!', ""))
}
