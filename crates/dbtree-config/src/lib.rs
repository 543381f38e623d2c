//! Configuration system for dbtree.
//!
//! dbtree uses TOML files named `.dbtree.toml`. Configuration is resolved by walking up
//! the directory tree from the current working directory, collecting any `.dbtree.toml`
//! files found, then loading `~/.dbtree.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDisplaySettings, RawSearchSettings, RawSourceSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::{display_path, resolve_path};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::{ConfigWarning, STEMMER_LANGUAGES};
use validate::validate_config;

/// Fully merged dbtree configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where records come from.
    pub source: SourceSettings,
    /// Search-related settings.
    pub search: SearchSettings,
    /// Output settings.
    pub display: DisplaySettings,
    /// Directory containing the most specific config file (determines index location).
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.dbtree.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from an explicit list of files, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Picks the database label: a non-blank configured label wins over the label the
    /// record source declared.
    pub fn database_label(&self, declared: Option<&str>) -> Option<String> {
        self.source
            .database
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .or(declared)
            .map(str::to_string)
    }

    /// Serializes the effective settings in `.dbtree.toml` format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            source: &self.source,
            search: &self.search,
            display: &self.display,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// The `[source]` section: where records come from.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Absolute path of the tagged-record file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<PathBuf>,
    /// Database label override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

/// The `[search]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Stemming language.
    pub stemmer: String,
    /// Searches taking longer than this many milliseconds are abandoned.
    pub timeout_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            stemmer: String::from("english"),
            timeout_ms: 5_000,
        }
    }
}

/// The `[display]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Deepest level printed by the tree view.
    pub depth: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            depth: String::from("pid"),
        }
    }
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Record source.
    source: &'a SourceSettings,
    /// Search settings.
    search: &'a SearchSettings,
    /// Display settings.
    display: &'a DisplaySettings,
}
