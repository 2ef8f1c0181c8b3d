//! Layered configuration for the `primer` binary.
//!
//! The core only ever sees the [`SetupPlan`] inside [`AppConfig`]. Sources,
//! strongest first (flags are applied by the commands themselves):
//!
//! 1. `PRIMER__*` environment variables (`PRIMER__OUTPUT__NO_COLOR=true`)
//! 2. The file passed with `--config`
//! 3. `.primer.toml` in the directory being worked on (the repository root
//!    for `setup`)
//! 4. The global file under the platform config directory
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use primer_core::domain::{CONFIG_FILE_NAME, SetupPlan};

const ENV_PREFIX: &str = "PRIMER";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template tokens, file filter and retire plan.
    pub plan: SetupPlan,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from every layer, reading the local file from
    /// `local_dir`.
    ///
    /// `config_file` is the path passed via `--config`; unlike the global and
    /// local files it must exist.
    pub fn load(local_dir: &Path, config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(
            Self::config_path().as_deref(),
            &local_dir.join(CONFIG_FILE_NAME),
            config_file,
        )
    }

    fn load_from(
        global: Option<&Path>,
        local: &Path,
        explicit: Option<&PathBuf>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("Invalid built-in defaults")?);

        if let Some(global) = global {
            debug!(path = %global.display(), "Global config layer");
            builder = builder.add_source(File::from(global).required(false));
        }
        debug!(path = %local.display(), "Local config layer");
        builder = builder.add_source(File::from(local).required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Explicit config layer");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Path to the global configuration file, if the platform has a config
    /// directory.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("rs", "primer", "primer")
            .map(|d| d.config_dir().join("config.toml"))
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
