//! Configuration for the `action-usage` command.
//!
//! Settings come from an optional YAML file, overridden by command-line
//! flags:
//!
//! ```yaml
//! database: /var/lib/pipelines/pipelines.db
//! shared-infra-group: 1
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::GroupId;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "action-usage.yaml";

/// Configuration file structure. Every field is optional so flags can fill gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to the pipeline database
    pub database: Option<PathBuf>,

    /// ID of the group whose actions are visible everywhere
    pub shared_infra_group: Option<GroupId>,
}

impl ConfigFile {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed YAML or unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a file.
    ///
    /// A relative `database` path is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read {}: {e}", path.display()),
            ))
        })?;
        let mut config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        if let Some(base) = path.parent() {
            config.database = config.database.map(|database| {
                if database.is_relative() {
                    base.join(database)
                } else {
                    database
                }
            });
        }

        Ok(config)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigFile::load`], except a missing file yields `Ok(None)`.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if path.is_file() {
            Self::load(path).map(Some)
        } else {
            tracing::debug!(path = %path.display(), "No configuration file");
            Ok(None)
        }
    }
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path to the pipeline database
    pub database: PathBuf,
    /// ID of the group whose actions are visible everywhere
    pub shared_infra_group: GroupId,
}

impl Settings {
    /// Merge file values with flag overrides. Flags win.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the database path or the shared-infra
    /// group is set by neither source.
    pub fn resolve(
        file: Option<ConfigFile>,
        database: Option<PathBuf>,
        shared_infra_group: Option<GroupId>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();

        let database = database.or(file.database).ok_or_else(|| {
            Error::Config(format!(
                "no database configured (use --database or set `database` in {CONFIG_FILE_NAME})"
            ))
        })?;
        let shared_infra_group = shared_infra_group
            .or(file.shared_infra_group)
            .ok_or_else(|| {
                Error::Config(format!(
                    "no shared-infra group configured (use --shared-infra-group or set `shared-infra-group` in {CONFIG_FILE_NAME})"
                ))
            })?;

        Ok(Self {
            database,
            shared_infra_group,
        })
    }
}
