//! Configuration merging.
//!
//! Merges parsed files into a single `Config`. Files arrive highest precedence first; each
//! scalar takes the value from the closest file that sets it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    Config, ConfigError, DisplaySettings, SearchSettings, SourceSettings,
    parse::{RawConfig, RawDisplaySettings, RawSearchSettings, RawSourceSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file; relative paths resolve against it.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges configuration files into a single resolved `Config`.
///
/// Configs must be in precedence order: closest to the working directory first, global
/// last. The record path is resolved against the directory of the file that set it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut source = SourceSettings::default();
    let mut search = SearchSettings::default();
    let mut display = DisplaySettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.source {
            apply_raw_source(&mut source, raw, parsed.dir())?;
        }
        if let Some(ref raw) = parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
        if let Some(ref raw) = parsed.config.display {
            apply_raw_display(&mut display, raw);
        }
    }

    let config_root = configs.first().map(|c| c.dir().to_path_buf());
    debug!(files = configs.len(), root = ?config_root, "merged configuration");

    Ok(Config {
        source,
        search,
        display,
        config_root,
    })
}

/// Applies a raw `[source]` section, resolving the record path.
fn apply_raw_source(
    result: &mut SourceSettings,
    raw: &RawSourceSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref records) = raw.records {
        result.records = Some(resolve_path(records, config_dir)?);
    }
    if let Some(ref database) = raw.database {
        result.database = Some(database.clone());
    }
    Ok(())
}

/// Applies a raw `[search]` section.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(ref v) = raw.stemmer {
        result.stemmer = v.clone();
    }
    if let Some(v) = raw.timeout_ms {
        result.timeout_ms = v;
    }
}

/// Applies a raw `[display]` section.
fn apply_raw_display(result: &mut DisplaySettings, raw: &RawDisplaySettings) {
    if let Some(ref v) = raw.depth {
        result.depth = v.clone();
    }
}
