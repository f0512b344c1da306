//! CLI command implementations.

mod display;

pub mod actions;
pub mod pipelines;
pub mod usage;
pub mod used;

use std::path::{Path, PathBuf};

use action_usage::config::{ConfigFile, Settings, CONFIG_FILE_NAME};
use action_usage::{GroupId, UsageAnalyzer};

/// Global options shared by every command.
pub struct Options {
    pub config: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub shared_infra_group: Option<i64>,
    pub json: bool,
}

/// Everything a command needs: an open analyzer and the resolved settings.
pub struct Context {
    pub analyzer: UsageAnalyzer,
    pub shared_infra_group: GroupId,
    pub json: bool,
}

impl Context {
    /// Resolve settings and open the database.
    ///
    /// An explicit `--config` must exist; the default file is optional.
    pub fn from_options(options: Options) -> Result<Self, action_usage::Error> {
        let file = match &options.config {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_optional(Path::new(CONFIG_FILE_NAME))?,
        };

        let settings = Settings::resolve(
            file,
            options.database,
            options.shared_infra_group.map(GroupId::from),
        )?;
        tracing::info!(
            database = %settings.database.display(),
            shared_infra_group = %settings.shared_infra_group,
            "Resolved settings"
        );

        Ok(Self {
            analyzer: UsageAnalyzer::open(&settings.database)?,
            shared_infra_group: settings.shared_infra_group,
            json: options.json,
        })
    }
}
