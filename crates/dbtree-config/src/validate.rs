//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// Stemming languages the index analyzer understands.
pub const STEMMER_LANGUAGES: &[&str] = &[
    "arabic",
    "danish",
    "dutch",
    "english",
    "finnish",
    "french",
    "german",
    "greek",
    "hungarian",
    "italian",
    "norwegian",
    "portuguese",
    "romanian",
    "russian",
    "spanish",
    "swedish",
    "tamil",
    "turkish",
];

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No `[source] records` file is configured.
    NoRecordSource,
    /// The configured record file does not exist.
    RecordFileMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The configured record path exists but is not a file.
    RecordPathNotFile {
        /// Path that is not a file.
        path: String,
    },
    /// The stemmer language is not supported.
    UnknownStemmer {
        /// The configured language.
        name: String,
    },
    /// `[source] database` is set but blank.
    EmptyDatabaseLabel,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecordSource => write!(f, "no record file is configured ([source] records)"),
            Self::RecordFileMissing { path } => write!(f, "record file does not exist: {path}"),
            Self::RecordPathNotFile { path } => write!(f, "record path is not a file: {path}"),
            Self::UnknownStemmer { name } => write!(f, "unknown stemmer language: {name}"),
            Self::EmptyDatabaseLabel => write!(f, "[source] database is set but empty"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    match &config.source.records {
        None => warnings.push(ConfigWarning::NoRecordSource),
        Some(path) if !path.exists() => warnings.push(ConfigWarning::RecordFileMissing {
            path: path.display().to_string(),
        }),
        Some(path) if !path.is_file() => warnings.push(ConfigWarning::RecordPathNotFile {
            path: path.display().to_string(),
        }),
        Some(_) => {}
    }

    if config
        .source
        .database
        .as_deref()
        .is_some_and(|label| label.trim().is_empty())
    {
        warnings.push(ConfigWarning::EmptyDatabaseLabel);
    }

    let stemmer = config.search.stemmer.to_lowercase();
    if !STEMMER_LANGUAGES.contains(&stemmer.as_str()) {
        warnings.push(ConfigWarning::UnknownStemmer {
            name: config.search.stemmer.clone(),
        });
    }

    warnings
}
