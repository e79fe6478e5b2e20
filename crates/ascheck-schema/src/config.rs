//! Checker configuration.
//!
//! Defaults match the ASDF schema namespace. A YAML file can override any
//! field; the two strict-mode switches can also be set from the environment.

use std::path::Path;

use ascheck_core::{
    Namespace, ID_PREFIX, METASCHEMA_ID, RESERVED_FILENAME_PREFIX, TAG_PREFIX, VALID_YAML_VERSIONS,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable enabling [`CheckConfig::strict_uniqueness`].
pub const ENV_STRICT_UNIQUENESS: &str = "ASCHECK_STRICT_UNIQUENESS";

/// Environment variable enabling [`CheckConfig::check_refs`].
pub const ENV_CHECK_REFS: &str = "ASCHECK_CHECK_REFS";

/// Settings for a corpus check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Prefix of canonical identifiers.
    pub id_prefix: String,
    /// Prefix of colon-form tags.
    pub tag_prefix: String,
    /// Required value of every schema's `$schema` key.
    pub metaschema_id: String,
    /// Accepted `%YAML` directive versions.
    pub yaml_versions: Vec<String>,
    /// File name prefix excluded from discovery.
    pub reserved_prefix: String,
    /// Fail documents whose id or tag is declared more than once in the corpus.
    pub strict_uniqueness: bool,
    /// Fail documents with a `$ref` into the namespace that no document declares.
    pub check_refs: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            id_prefix: ID_PREFIX.to_string(),
            tag_prefix: TAG_PREFIX.to_string(),
            metaschema_id: METASCHEMA_ID.to_string(),
            yaml_versions: VALID_YAML_VERSIONS.iter().map(|v| v.to_string()).collect(),
            reserved_prefix: RESERVED_FILENAME_PREFIX.to_string(),
            strict_uniqueness: false,
            check_refs: false,
        }
    }
}

impl CheckConfig {
    /// Load a configuration file. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid configuration.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parse configuration from YAML text. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Switch on strict-mode checks requested through the environment.
    ///
    /// The environment can only enable a check, never disable one that the
    /// file or command line turned on.
    pub fn apply_env(&mut self) {
        if env_flag(ENV_STRICT_UNIQUENESS) {
            self.strict_uniqueness = true;
        }
        if env_flag(ENV_CHECK_REFS) {
            self.check_refs = true;
        }
    }

    /// Identifier/tag prefixes as a [`Namespace`].
    pub fn namespace(&self) -> Namespace {
        Namespace {
            id_prefix: self.id_prefix.clone(),
            tag_prefix: self.tag_prefix.clone(),
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
