//! # Schema Document Model
//!
//! A schema file is parsed with `serde_yaml` and converted into an explicit
//! [`Node`] tree: mappings (insertion ordered), sequences, and scalars. The
//! extraction functions in this module walk that tree to find every
//! outgoing reference a schema makes:
//!
//! - **Direct**: the value of any `$ref` key, at any depth.
//! - **Example tag**: bang tags such as `!core/ndarray-1.0.0` embedded in the
//!   YAML text of an `examples` entry.
//! - **Description ref**: `(ref:core/ndarray-1.0.0)` expressions embedded
//!   in the free-text `description`.
//!
//! Trees are built once and never mutated. Depth is bounded at construction
//! so the walks below never need a guard of their own.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use ascheck_core::{Namespace, SchemaId, Tag};
use regex::Regex;
use serde::Serialize;

use crate::error::DocumentError;

/// Maximum nesting depth accepted when building a [`Node`] tree.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Bang tag with a version suffix. The final version component matches a
/// single digit only, so `!a/b-1.0.10` is found as `!a/b-1.0.1`.
static YAML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"![a-z/0-9_-]+-[0-9]+\.[0-9]+\.[0-9]").unwrap());

static DESCRIPTION_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(ref:(.*?)\)").unwrap());

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Bool(bool),
    /// Numbers keep their YAML text form.
    Number(String),
    String(String),
}

/// One node of a parsed schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Key/value pairs in document order.
    Mapping(Vec<(String, Node)>),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    /// Convert a `serde_yaml` value into a [`Node`] tree.
    ///
    /// YAML tags on values are dropped and the tagged value kept. Numeric
    /// and boolean mapping keys are stringified.
    ///
    /// # Errors
    ///
    /// [`DocumentError::UnsupportedKey`] for null, sequence, mapping or tagged
    /// keys; [`DocumentError::TooDeep`] past [`MAX_NESTING_DEPTH`].
    pub fn from_yaml(value: &serde_yaml::Value) -> Result<Self, DocumentError> {
        Self::convert(value, 0)
    }

    fn convert(value: &serde_yaml::Value, depth: usize) -> Result<Self, DocumentError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(DocumentError::TooDeep {
                max_depth: MAX_NESTING_DEPTH,
            });
        }
        match value {
            serde_yaml::Value::Null => Ok(Node::Scalar(Scalar::Null)),
            serde_yaml::Value::Bool(b) => Ok(Node::Scalar(Scalar::Bool(*b))),
            serde_yaml::Value::Number(n) => Ok(Node::Scalar(Scalar::Number(n.to_string()))),
            serde_yaml::Value::String(s) => Ok(Node::Scalar(Scalar::String(s.clone()))),
            serde_yaml::Value::Sequence(seq) => seq
                .iter()
                .map(|item| Self::convert(item, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Node::Sequence),
            serde_yaml::Value::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (k, v) in map {
                    let key = match k {
                        serde_yaml::Value::String(s) => s.clone(),
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        other => return Err(DocumentError::UnsupportedKey(format!("{other:?}"))),
                    };
                    entries.push((key, Self::convert(v, depth + 1)?));
                }
                Ok(Node::Mapping(entries))
            }
            serde_yaml::Value::Tagged(tagged) => Self::convert(&tagged.value, depth),
        }
    }

    /// Look up `key` if this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// The string value, if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The items, if this node is a sequence.
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Scalar(Scalar::Null) => "null",
            Node::Scalar(Scalar::Bool(_)) => "boolean",
            Node::Scalar(Scalar::Number(_)) => "number",
            Node::Scalar(Scalar::String(_)) => "string",
        }
    }

    /// Render a scalar the way it would appear in YAML, or the node kind
    /// for collections.
    pub fn describe(&self) -> String {
        match self {
            Node::Scalar(Scalar::Null) => "null".to_string(),
            Node::Scalar(Scalar::Bool(b)) => b.to_string(),
            Node::Scalar(Scalar::Number(n)) => n.clone(),
            Node::Scalar(Scalar::String(s)) => format!("'{s}'"),
            other => other.kind().to_string(),
        }
    }
}

/// Where an extracted reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Value of a `$ref` key, joined against the document id.
    Direct,
    /// Bang tag inside an example body.
    ExampleTag,
    /// `(ref:...)` expression inside the description.
    DescriptionRef,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReferenceKind::Direct => "direct",
            ReferenceKind::ExampleTag => "example-tag",
            ReferenceKind::DescriptionRef => "description-ref",
        };
        f.pad(s)
    }
}

/// An outgoing reference of a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub kind: ReferenceKind,
    /// Absolute target identifier (or the raw `$ref` when the document has
    /// no id to resolve against).
    pub target: String,
}

/// A parsed schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDocument {
    path: PathBuf,
    root: Node,
}

impl SchemaDocument {
    /// Read and parse the schema at `path`.
    ///
    /// # Errors
    ///
    /// [`DocumentError::Read`] if the file cannot be read, otherwise any
    /// error of [`SchemaDocument::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse schema text that was loaded from `path`.
    ///
    /// # Errors
    ///
    /// [`DocumentError::Yaml`] for invalid YAML, [`DocumentError::NotAMapping`]
    /// if the top level is not a mapping, and the conversion errors of
    /// [`Node::from_yaml`].
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, DocumentError> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        Self::from_node(path, Node::from_yaml(&value)?)
    }

    /// Wrap an already-built tree.
    ///
    /// # Errors
    ///
    /// [`DocumentError::NotAMapping`] if `root` is not a mapping.
    pub fn from_node(path: impl Into<PathBuf>, root: Node) -> Result<Self, DocumentError> {
        if !matches!(root, Node::Mapping(_)) {
            return Err(DocumentError::NotAMapping { found: root.kind() });
        }
        Ok(Self {
            path: path.into(),
            root,
        })
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component of [`path`](Self::path), for messages.
    pub fn file_name(&self) -> String {
        file_name(&self.path)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Top-level value for `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.root.get(key)
    }

    /// Top-level string value for `key`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Node::as_str)
    }

    /// The declared `id`, if it is a string.
    pub fn schema_id(&self) -> Option<SchemaId> {
        self.get_str("id").map(SchemaId::from)
    }

    /// The declared `tag`, if it is a string.
    pub fn tag(&self) -> Option<Tag> {
        self.get_str("tag").map(Tag::new)
    }

    /// The declared `$schema`.
    pub fn metaschema(&self) -> Option<&str> {
        self.get_str("$schema")
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    /// Every `$ref` value in the document, see [`list_refs`].
    pub fn refs(&self) -> Vec<&str> {
        list_refs(&self.root)
    }

    /// All outgoing references, tagged by kind.
    ///
    /// Direct references come first in document order, then example tags
    /// (sorted), then description refs (sorted).
    ///
    /// # Errors
    ///
    /// [`DocumentError::MalformedExamples`] if `examples` is malformed, or an
    /// identifier error if a `$ref` cannot be joined against the id.
    pub fn references(&self, ns: &Namespace) -> Result<Vec<Reference>, DocumentError> {
        let id = self.schema_id();
        let mut out = Vec::new();
        for raw in self.refs() {
            let target = match &id {
                Some(id) => id.join(raw)?,
                None => raw.to_string(),
            };
            out.push(Reference {
                kind: ReferenceKind::Direct,
                target,
            });
        }
        out.extend(
            list_example_ids(self, ns)?
                .into_iter()
                .map(|target| Reference {
                    kind: ReferenceKind::ExampleTag,
                    target,
                }),
        );
        out.extend(
            list_description_ids(self, ns)
                .into_iter()
                .map(|target| Reference {
                    kind: ReferenceKind::DescriptionRef,
                    target,
                }),
        );
        Ok(out)
    }
}

/// Collect every value stored under a `$ref` key, depth first, in document
/// order. The value of a `$ref` key is itself not searched. Non-string
/// `$ref` values are skipped.
pub fn list_refs(node: &Node) -> Vec<&str> {
    let mut refs = Vec::new();
    collect_refs(node, &mut refs);
    refs
}

fn collect_refs<'a>(node: &'a Node, acc: &mut Vec<&'a str>) {
    match node {
        Node::Mapping(entries) => {
            for (key, value) in entries {
                if key == "$ref" {
                    if let Some(s) = value.as_str() {
                        acc.push(s);
                    }
                } else {
                    collect_refs(value, acc);
                }
            }
        }
        Node::Sequence(items) => {
            for item in items {
                collect_refs(item, acc);
            }
        }
        Node::Scalar(_) => {}
    }
}

/// Identifiers of every bang tag found in the document's example bodies,
/// deduplicated and sorted.
///
/// Each `examples` entry is either `[description, yaml]` or
/// `[description, standard-version, yaml]`. The YAML text is always the
/// last item.
///
/// # Errors
///
/// [`DocumentError::MalformedExamples`] if `examples` is not a sequence of
/// such entries.
pub fn list_example_ids(
    doc: &SchemaDocument,
    ns: &Namespace,
) -> Result<Vec<String>, DocumentError> {
    let Some(examples) = doc.get("examples") else {
        return Ok(Vec::new());
    };
    let entries = examples.as_sequence().ok_or_else(|| {
        DocumentError::MalformedExamples(format!("expected a sequence, found {}", examples.kind()))
    })?;

    let mut ids = BTreeSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let text = entry
            .as_sequence()
            .filter(|items| matches!(items.len(), 2 | 3))
            .and_then(|items| items.last())
            .and_then(Node::as_str)
            .ok_or_else(|| {
                DocumentError::MalformedExamples(format!(
                    "entry {index} is not a [description, (version,) text] list"
                ))
            })?;
        ids.extend(
            YAML_TAG_RE
                .find_iter(text)
                .map(|m| ns.yaml_tag_to_id(m.as_str())),
        );
    }
    Ok(ids.into_iter().collect())
}

/// Identifiers named by `(ref:...)` expressions in the description.
///
/// Bodies that do not start with `http:` are taken relative to the
/// namespace's identifier prefix.
pub fn list_description_ids(doc: &SchemaDocument, ns: &Namespace) -> BTreeSet<String> {
    let Some(description) = doc.description() else {
        return BTreeSet::new();
    };
    DESCRIPTION_REF_RE
        .captures_iter(description)
        .filter_map(|caps| caps.get(1))
        .map(|m| ns.qualify(m.as_str()))
        .collect()
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
