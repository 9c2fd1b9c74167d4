//! Logging setup built on `fern`.
//!
//! Every module logs through the `log` macros; this module decides where the
//! records go.

use anyhow::{Context, Result};
use chrono::Utc;
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Dependency targets that are too verbose below `warn`.
const QUIET_TARGETS: [&str; 4] = ["sqlx", "sea_orm", "hyper", "tower_http"];

/// Parse the configured level, turning logging off entirely when disabled.
pub fn level_filter(config: &LoggingConfig) -> Result<LevelFilter> {
    if !config.enabled {
        return Ok(LevelFilter::Off);
    }
    config
        .level
        .parse::<LevelFilter>()
        .with_context(|| format!("Invalid log level: {}", config.level))
}

/// Build the dispatch without installing it.
pub fn build_dispatch(config: &LoggingConfig) -> Result<fern::Dispatch> {
    let level = level_filter(config)?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level);

    for target in QUIET_TARGETS {
        dispatch = dispatch.level_for(target, level.min(LevelFilter::Warn));
    }

    dispatch = dispatch.chain(std::io::stderr());

    if let Some(path) = &config.file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    Ok(dispatch)
}

/// Install the global logger.
///
/// Fails if a logger is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    build_dispatch(config)?
        .apply()
        .context("A global logger is already installed")?;
    Ok(())
}
