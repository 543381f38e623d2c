//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use dbtree_config::Config;
use dbtree_hierarchy::{Hierarchy, HierarchyError, build};
use dbtree_index::{TantivyIndex, index_directory, index_exists};
use dbtree_query::{MatchSet, SearchError, SearchIndex};
use dbtree_record::{Document, ingest_file};
use tracing::debug;

use crate::cli::args::SourceArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

/// Documents read from the record source, with their resolved database label.
pub struct LoadedRecords {
    /// Label the hierarchy is rooted at.
    pub database_label: String,
    /// Documents in file order.
    pub documents: Vec<Document>,
    /// File they were read from.
    pub path: PathBuf,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// The record file: `--records` relative to the working directory, else the config.
    pub fn records_path(&self, source: &SourceArgs) -> Result<PathBuf, ExitCode> {
        if let Some(path) = &source.records {
            return Ok(self.cwd.join(path));
        }
        self.config.source.records.clone().ok_or_else(|| {
            eprintln!("error: no record file configured");
            eprintln!("Pass --records PATH or set [source] records in .dbtree.toml (see 'dbtree init').");
            ExitCode::FAILURE
        })
    }

    /// Reads and ingests the record source and settles the database label.
    ///
    /// Label precedence: `--database`, then `[source] database`, then the file's `dbName`.
    /// The chosen label is trimmed.
    pub fn load_records(&self, source: &SourceArgs) -> Result<LoadedRecords, ExitCode> {
        let path = self.records_path(source)?;
        let batch = ingest_file(&path).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;

        let database_label = source
            .database
            .clone()
            .filter(|label| !label.trim().is_empty())
            .or_else(|| self.config.database_label(batch.database_label.as_deref()))
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .ok_or_else(|| {
                eprintln!("error: {}", HierarchyError::MissingDatabaseLabel);
                ExitCode::FAILURE
            })?;

        Ok(LoadedRecords {
            database_label,
            documents: batch.documents,
            path,
        })
    }

    /// Loads records and aggregates them into a hierarchy.
    pub fn load_hierarchy(&self, source: &SourceArgs) -> Result<Hierarchy, ExitCode> {
        let records = self.load_records(source)?;
        debug!(records = %records.path.display(), "aggregating records");
        build(&records.database_label, records.documents).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Directory the index lives in; requires a configuration file.
    pub fn index_dir(&self) -> Result<PathBuf, ExitCode> {
        index_directory(&self.config).ok_or_else(|| {
            eprintln!("error: no configuration found, so there is no index location");
            eprintln!("Run 'dbtree init' to create a .dbtree.toml.");
            ExitCode::FAILURE
        })
    }

    /// Opens the index for searching. Failure is reported through the returned handle
    /// rather than aborting, so searches degrade to no matches.
    pub fn search_index(&self) -> CliIndex {
        let Some(dir) = index_directory(&self.config) else {
            return CliIndex::Unavailable("no configuration found".to_string());
        };
        if !index_exists(&dir) {
            return CliIndex::Unavailable(format!(
                "no index at {} (run 'dbtree index')",
                dir.display()
            ));
        }
        match TantivyIndex::open(&dir, &self.config.search.stemmer) {
            Ok(index) => CliIndex::Open(index),
            Err(e) => CliIndex::Unavailable(e.to_string()),
        }
    }
}

/// The index a search runs against, or why there is none.
pub enum CliIndex {
    /// An opened index.
    Open(TantivyIndex),
    /// The index could not be opened.
    Unavailable(String),
}

impl SearchIndex for CliIndex {
    fn search(&self, database: &str, query: &str) -> Result<MatchSet, SearchError> {
        match self {
            Self::Open(index) => index.search(database, query),
            Self::Unavailable(reason) => Err(SearchError::Unavailable(reason.clone())),
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
