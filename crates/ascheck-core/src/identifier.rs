//! # Schema Identifiers and Tags
//!
//! Newtype wrappers for the two ways a schema document is named, plus the
//! free functions that translate between them. An identifier decomposes
//! into a *base* and a *version* at its last hyphen:
//!
//! ```text
//! http://stsci.edu/schemas/asdf/core/ndarray-1.0.0
//! └──────────────── base ─────────────────┘ └ver┘
//! ```
//!
//! Identifiers that share a base refer to different versions of the same
//! document. That relation is what the staleness checks are built on.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::IdentifierError;
use crate::namespace::{rewrite_tag, rewrite_yaml_tag, ID_PREFIX, TAG_PREFIX};

/// Split an identifier into `(base, version)` at its last `-`.
///
/// An identifier without any `-` has no version suffix; the whole string
/// is returned as the base.
pub fn split_id(schema_id: &str) -> (&str, Option<&str>) {
    match schema_id.rsplit_once('-') {
        Some((base, version)) => (base, Some(version)),
        None => (schema_id, None),
    }
}

/// Map a colon-form tag (`tag:stsci.edu:asdf/...`) to its identifier.
///
/// # Errors
///
/// Returns [`IdentifierError::MissingTagPrefix`] when the tag is not in the
/// `tag:stsci.edu:asdf/` namespace.
pub fn tag_to_id(tag: &str) -> Result<String, IdentifierError> {
    rewrite_tag(tag, TAG_PREFIX, ID_PREFIX)
}

/// Map a bang-form tag (`!core/ndarray-1.0.0`) to its identifier.
///
/// Only the `!` is stripped; the interior is not validated.
pub fn yaml_tag_to_id(yaml_tag: &str) -> String {
    rewrite_yaml_tag(yaml_tag, ID_PREFIX)
}

/// Resolve a `$ref` value against the identifier of the schema holding it.
///
/// Uses RFC 3986 reference resolution, so relative paths, fragments and
/// absolute URIs all behave as they would in a browser.
///
/// # Errors
///
/// Returns [`IdentifierError::InvalidUri`] if `schema_id` is not an absolute
/// URI or the join fails.
pub fn ref_to_id(schema_id: &str, reference: &str) -> Result<String, IdentifierError> {
    let base = Url::parse(schema_id).map_err(|e| IdentifierError::InvalidUri {
        uri: schema_id.to_string(),
        reason: e.to_string(),
    })?;
    let joined = base.join(reference).map_err(|e| IdentifierError::InvalidUri {
        uri: format!("{schema_id} + {reference}"),
        reason: e.to_string(),
    })?;
    Ok(joined.to_string())
}

/// Absolute URI naming one version of one schema document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(String);

impl SchemaId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The version-independent part of the identifier.
    pub fn base(&self) -> &str {
        split_id(&self.0).0
    }

    /// The version suffix, if the identifier carries one.
    pub fn version(&self) -> Option<&str> {
        split_id(&self.0).1
    }

    /// True if `other` names a different version of the same document.
    pub fn is_other_version_of(&self, other: &str) -> bool {
        split_id(other).0 == self.base() && other != self.0
    }

    /// Resolve a `$ref` found inside this schema.
    ///
    /// # Errors
    ///
    /// See [`ref_to_id`].
    pub fn join(&self, reference: &str) -> Result<String, IdentifierError> {
        ref_to_id(&self.0, reference)
    }
}

impl std::fmt::Display for SchemaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SchemaId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SchemaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Short alternate name of a schema, in either colon or bang form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Wrap a tag string.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_id_on_last_hyphen() {
        assert_eq!(
            split_id("http://stsci.edu/schemas/asdf/core/complex-number-1.0.0"),
            ("http://stsci.edu/schemas/asdf/core/complex-number", Some("1.0.0"))
        );
    }

    #[test]
    fn split_id_without_hyphen_has_no_version() {
        assert_eq!(
            split_id("http://stsci.edu/schemas/asdf/core/ndarray"),
            ("http://stsci.edu/schemas/asdf/core/ndarray", None)
        );
    }

    #[test]
    fn yaml_tag_to_id_prepends_namespace() {
        assert_eq!(
            yaml_tag_to_id("!custom/thing-1.0.0"),
            "http://stsci.edu/schemas/asdf/custom/thing-1.0.0"
        );
    }

    #[test]
    fn tag_to_id_rewrites_prefix() {
        assert_eq!(
            tag_to_id("tag:stsci.edu:asdf/custom/thing-1.0.0").unwrap(),
            "http://stsci.edu/schemas/asdf/custom/thing-1.0.0"
        );
    }

    #[test]
    fn tag_to_id_rejects_foreign_namespace() {
        let err = tag_to_id("tag:example.org:custom/thing-1.0.0").unwrap_err();
        assert!(matches!(err, IdentifierError::MissingTagPrefix { .. }));
        assert!(err.to_string().contains("tag:stsci.edu:asdf/"));
    }

    #[test]
    fn ref_to_id_resolves_relative_paths() {
        let id = "http://stsci.edu/schemas/asdf/core/ndarray-1.0.0";
        assert_eq!(
            ref_to_id(id, "../unit/unit-1.0.0").unwrap(),
            "http://stsci.edu/schemas/asdf/unit/unit-1.0.0"
        );
        assert_eq!(
            ref_to_id(id, "complex-1.0.0").unwrap(),
            "http://stsci.edu/schemas/asdf/core/complex-1.0.0"
        );
        assert_eq!(
            ref_to_id(id, "#/definitions/shape").unwrap(),
            "http://stsci.edu/schemas/asdf/core/ndarray-1.0.0#/definitions/shape"
        );
    }

    #[test]
    fn ref_to_id_keeps_absolute_refs() {
        let id = "http://stsci.edu/schemas/asdf/core/ndarray-1.0.0";
        assert_eq!(
            ref_to_id(id, "http://json-schema.org/draft-04/schema").unwrap(),
            "http://json-schema.org/draft-04/schema"
        );
    }

    #[test]
    fn ref_to_id_rejects_relative_base() {
        let err = ref_to_id("core/ndarray-1.0.0", "x").unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidUri { .. }));
    }

    #[test]
    fn schema_id_base_and_version() {
        let id = SchemaId::new("http://stsci.edu/schemas/asdf/custom/thing-1.0.0");
        assert_eq!(id.base(), "http://stsci.edu/schemas/asdf/custom/thing");
        assert_eq!(id.version(), Some("1.0.0"));
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn schema_id_other_version_detection() {
        let id = SchemaId::new("http://stsci.edu/schemas/asdf/custom/thing-1.0.0");
        assert!(id.is_other_version_of("http://stsci.edu/schemas/asdf/custom/thing-0.9.0"));
        assert!(!id.is_other_version_of("http://stsci.edu/schemas/asdf/custom/thing-1.0.0"));
        assert!(!id.is_other_version_of("http://stsci.edu/schemas/asdf/other/thing-0.1.0"));
    }

    #[test]
    fn newtypes_serialize_transparently() {
        let id = SchemaId::new("http://stsci.edu/schemas/asdf/core/ndarray-1.0.0");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"http://stsci.edu/schemas/asdf/core/ndarray-1.0.0\"");
        let back: SchemaId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Splitting undoes hyphen-joining for any base and numeric version.
        #[test]
        fn split_inverts_join(
            base in "[a-z][a-z0-9_/]{0,30}",
            major in 0u32..1000,
            minor in 0u32..1000,
            patch in 0u32..1000,
        ) {
            let version = format!("{major}.{minor}.{patch}");
            let id = format!("{ID_PREFIX}{base}-{version}");
            let (b, v) = split_id(&id);
            let expected_base = format!("{ID_PREFIX}{base}");
            prop_assert_eq!(b, expected_base.as_str());
            prop_assert_eq!(v, Some(version.as_str()));
        }

        /// Both tag encodings of the same name map to the same identifier.
        #[test]
        fn tag_forms_agree(name in "[a-z][a-z0-9_/]{0,30}-[0-9]\\.[0-9]\\.[0-9]") {
            let from_colon = tag_to_id(&format!("{TAG_PREFIX}{name}")).unwrap();
            let from_bang = yaml_tag_to_id(&format!("!{name}"));
            prop_assert_eq!(from_colon, from_bang);
        }
    }
}
