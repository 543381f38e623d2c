//! Configuration file parsing.
//!
//! Parses individual `.dbtree.toml` files into `RawConfig` values whose fields are all
//! optional, so partial files can be merged.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Record source section.
    pub source: Option<RawSourceSettings>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Display settings section.
    pub display: Option<RawDisplaySettings>,
}

/// Raw `[source]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSourceSettings {
    /// Tagged-record file, relative to the declaring config file.
    pub records: Option<String>,
    /// Database label override.
    pub database: Option<String>,
}

/// Raw `[search]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSearchSettings {
    /// Stemming language.
    pub stemmer: Option<String>,
    /// Search time limit in milliseconds.
    pub timeout_ms: Option<u64>,
}

/// Raw `[display]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawDisplaySettings {
    /// Deepest level printed by the tree view.
    pub depth: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string. `path` is only used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.source.is_none());
        assert!(config.search.is_none());
        assert!(config.display.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
root = true

[source]
records = "exports/records.xml"
database = "Hosp"

[search]
stemmer = "french"
timeout_ms = 250

[display]
depth = "area"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.root, Some(true));
        let source = config.source.unwrap();
        assert_eq!(source.records.as_deref(), Some("exports/records.xml"));
        assert_eq!(source.database.as_deref(), Some("Hosp"));
        let search = config.search.unwrap();
        assert_eq!(search.stemmer.as_deref(), Some("french"));
        assert_eq!(search.timeout_ms, Some(250));
        assert_eq!(config.display.unwrap().depth.as_deref(), Some("area"));
    }

    #[test]
    fn test_parse_partial_section() {
        let config = parse_config("[source]\ndatabase = \"Clinic\"\n").unwrap();
        let source = config.source.unwrap();
        assert!(source.records.is_none());
        assert_eq!(source.database.as_deref(), Some("Clinic"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = parse_config_str("[source]\nrecord = \"x.xml\"\n", Path::new("bad.toml"));
        let Err(ConfigError::ParseToml { path, .. }) = result else {
            panic!("expected ParseToml, got {result:?}");
        };
        assert_eq!(path, Path::new("bad.toml"));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let err = parse_config_str("[source", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let test_dir = TestDir::new();
        let err = parse_config_file(&test_dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_is_root_config() {
        let test_dir = TestDir::new();
        let root = test_dir.create_root_config("a");
        let plain = test_dir.create_config("b");
        let broken = test_dir.create_config_with_content("c", "root = [");

        assert!(is_root_config(&root));
        assert!(!is_root_config(&plain));
        assert!(!is_root_config(&broken));
    }
}
