//! # Resolver Seam
//!
//! The checker never decides on its own where a schema lives. It asks an
//! injected [`Resolver`] to map an identifier or tag to a location and then
//! verifies that the location is the file the schema was loaded from.
//!
//! Two implementations ship with the crate:
//!
//! - [`DirectoryResolver`] maps the identifier namespace onto a directory
//!   tree, `http://stsci.edu/schemas/asdf/core/ndarray-1.0.0` →
//!   `file:///<root>/core/ndarray-1.0.0.yaml`. Colon-form tags are first
//!   rewritten to identifiers.
//! - [`StaticResolver`] reads an explicit key → location table.
//!
//! Any `Fn(&str) -> Result<String, ResolveError>` is also a resolver.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ascheck_core::Namespace;
use url::Url;

use crate::error::ResolveError;

/// Maps an identifier or tag to a location (a URI or a plain path).
pub trait Resolver {
    /// Resolve `key` to a location.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] if the key cannot be mapped.
    fn resolve(&self, key: &str) -> Result<String, ResolveError>;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> Result<String, ResolveError>,
{
    fn resolve(&self, key: &str) -> Result<String, ResolveError> {
        self(key)
    }
}

/// Resolves the identifier namespace onto a directory of `.yaml` files.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
    namespace: Namespace,
}

impl DirectoryResolver {
    /// Build a resolver for the ASDF namespace rooted at `root`.
    ///
    /// # Errors
    ///
    /// [`ResolveError::InvalidRoot`] if `root` does not exist or cannot be
    /// canonicalized.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ResolveError> {
        Self::with_namespace(root, Namespace::default())
    }

    /// Build a resolver for an arbitrary namespace.
    ///
    /// # Errors
    ///
    /// See [`DirectoryResolver::new`].
    pub fn with_namespace(
        root: impl AsRef<Path>,
        namespace: Namespace,
    ) -> Result<Self, ResolveError> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|e| ResolveError::InvalidRoot {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { root, namespace })
    }

    /// The canonical root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file an identifier or tag maps to.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnknownKey`] for keys outside the namespace.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, ResolveError> {
        let id = if key.starts_with(&self.namespace.tag_prefix) {
            self.namespace.tag_to_id(key)?
        } else {
            key.to_string()
        };
        let relative = id
            .strip_prefix(&self.namespace.id_prefix)
            .ok_or_else(|| ResolveError::UnknownKey(key.to_string()))?;
        Ok(self.root.join(format!("{relative}.yaml")))
    }
}

impl Resolver for DirectoryResolver {
    fn resolve(&self, key: &str) -> Result<String, ResolveError> {
        let path = self.path_for(key)?;
        let url = Url::from_file_path(&path).map_err(|()| ResolveError::InvalidLocation(path))?;
        tracing::trace!(key, location = %url, "resolved");
        Ok(url.to_string())
    }
}

/// Resolves keys from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    table: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `key` to `location`, replacing any earlier mapping.
    pub fn insert(&mut self, key: impl Into<String>, location: impl Into<String>) -> &mut Self {
        self.table.insert(key.into(), location.into());
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, key: &str) -> Result<String, ResolveError> {
        self.table
            .get(key)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownKey(key.to_string()))
    }
}

/// The filesystem path named by a resolver location.
///
/// `file:` URLs are converted to native paths, other URLs contribute their
/// path component, and anything that does not parse as a URL is taken as a
/// path verbatim.
pub fn location_to_path(location: &str) -> PathBuf {
    match Url::parse(location) {
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .unwrap_or_else(|()| PathBuf::from(url.path())),
        Ok(url) if url.scheme().len() > 1 => PathBuf::from(url.path()),
        // Plain paths, including Windows drive letters misread as schemes.
        _ => PathBuf::from(location),
    }
}

/// True if both paths exist and canonicalize to the same file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_resolver_maps_ids_and_tags_to_the_same_file() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = DirectoryResolver::new(tmp.path()).unwrap();

        let from_id = resolver
            .resolve("http://stsci.edu/schemas/asdf/core/ndarray-1.0.0")
            .unwrap();
        let from_tag = resolver
            .resolve("tag:stsci.edu:asdf/core/ndarray-1.0.0")
            .unwrap();
        assert_eq!(from_id, from_tag);
        assert!(from_id.starts_with("file://"));
        assert_eq!(
            location_to_path(&from_id),
            resolver.root().join("core/ndarray-1.0.0.yaml")
        );
    }

    #[test]
    fn directory_resolver_rejects_foreign_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = DirectoryResolver::new(tmp.path()).unwrap();
        let err = resolver.resolve("http://example.org/thing-1.0.0").unwrap_err();
        assert!(matches!(err, ResolveError::UnknownKey(_)));
    }

    #[test]
    fn directory_resolver_requires_existing_root() {
        let err = DirectoryResolver::new("/definitely/not/here").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidRoot { .. }));
    }

    #[test]
    fn static_resolver_lookup() {
        let mut resolver = StaticResolver::new();
        resolver.insert("a", "/tmp/a.yaml");
        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.resolve("a").unwrap(), "/tmp/a.yaml");
        assert!(resolver.resolve("b").is_err());
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |key: &str| -> Result<String, ResolveError> { Ok(format!("/x/{key}")) };
        assert_eq!(resolver.resolve("k").unwrap(), "/x/k");
    }

    #[test]
    fn location_to_path_handles_each_form() {
        assert_eq!(
            location_to_path("file:///tmp/schemas/a-1.0.0.yaml"),
            PathBuf::from("/tmp/schemas/a-1.0.0.yaml")
        );
        assert_eq!(
            location_to_path("http://example.org/schemas/a-1.0.0.yaml"),
            PathBuf::from("/schemas/a-1.0.0.yaml")
        );
        assert_eq!(
            location_to_path("relative/a-1.0.0.yaml"),
            PathBuf::from("relative/a-1.0.0.yaml")
        );
    }

    #[test]
    fn same_file_follows_dot_segments() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.yaml");
        std::fs::write(&file, "x").unwrap();
        let roundabout = tmp.path().join("sub").join("..").join("a.yaml");
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        assert!(same_file(&file, &roundabout));
        assert!(!same_file(&file, &tmp.path().join("missing.yaml")));
    }

    #[cfg(unix)]
    #[test]
    fn same_file_follows_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.yaml");
        let other = tmp.path().join("b.yaml");
        std::fs::write(&file, "x").unwrap();
        std::fs::write(&other, "x").unwrap();
        let dir_link = tmp.path().join("aliased");
        std::os::unix::fs::symlink(tmp.path(), &dir_link).unwrap();
        let file_link = tmp.path().join("link.yaml");
        std::os::unix::fs::symlink(&file, &file_link).unwrap();

        assert!(same_file(&file, &file_link));
        assert!(same_file(&file, &dir_link.join("a.yaml")));
        assert!(!same_file(&other, &file_link));

        let dangling = tmp.path().join("dangling.yaml");
        std::os::unix::fs::symlink(tmp.path().join("gone.yaml"), &dangling).unwrap();
        assert!(!same_file(&file, &dangling));
    }
}
