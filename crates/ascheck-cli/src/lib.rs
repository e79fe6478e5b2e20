//! # ascheck-cli — Command-Line Front End
//!
//! Provides the `ascheck` binary:
//!
//! - `ascheck check <ROOT>`: check every schema under a corpus root.
//! - `ascheck refs <FILE>`: list the outgoing references of one schema.
//!
//! ```bash
//! ascheck check schemas/stsci.edu/asdf
//! ascheck -v --config ascheck.yaml check schemas --check-refs --format json
//! ```

pub mod check;
pub mod refs;

use std::path::Path;

use anyhow::{Context, Result};
use ascheck_schema::CheckConfig;

/// Load the configuration file if one was given, then apply the
/// environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<CheckConfig> {
    let mut config = match path {
        Some(path) => CheckConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CheckConfig::default(),
    };
    config.apply_env();
    tracing::debug!(?config, "effective configuration");
    Ok(config)
}
