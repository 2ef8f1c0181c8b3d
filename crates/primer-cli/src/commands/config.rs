//! `primer config`: inspect or create the configuration file.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, ResultExt},
    output::{OutputManager, Tone},
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.print(&serialise(&config)?)?;
            }
        }

        ConfigCommands::Path => {
            let path = AppConfig::config_path().ok_or_else(no_config_dir)?;
            output.print(&path.display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            let path = AppConfig::config_path().ok_or_else(no_config_dir)?;
            if write_default(&path, force)? {
                output.say(
                    Tone::Done,
                    &format!("Configuration created at {}", path.display()),
                )?;
            } else {
                output.say(
                    Tone::Skipped,
                    &format!(
                        "{} already exists, pass --force to overwrite it",
                        path.display()
                    ),
                )?;
            }
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn serialise(config: &AppConfig) -> CliResult<String> {
    config.to_toml().map_err(|e| CliError::Config {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn no_config_dir() -> CliError {
    CliError::config("No configuration directory on this platform")
}

/// Write the default configuration to `path`. Returns `false` when a file
/// already exists and `force` is not set.
fn write_default(path: &Path, force: bool) -> CliResult<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    let toml = serialise(&AppConfig::default())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).or_cli(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, toml)
        .or_cli(|| format!("Failed to write config to '{}'", path.display()))?;

    Ok(true)
}

// ── tests ─────────────────────────────────────────────────────────────────────
