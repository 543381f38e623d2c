//! Clap argument definitions for the `dbtree` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use dbtree_hierarchy::Level;
use dbtree_query::FilterTag;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "dbtree")]
#[command(about = "Browse clinical report records as a hierarchy and highlight search hits")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read records from, overriding `[source]` in the configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Tagged-record XML file
    #[arg(long, value_name = "PATH")]
    pub records: Option<PathBuf>,

    /// Database label (overrides the configuration and the file's dbName)
    #[arg(long, value_name = "LABEL")]
    pub database: Option<String>,
}

/// Arguments for `dbtree init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.dbtree.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `dbtree tree`.
#[derive(Args, Debug, Clone)]
pub struct TreeCommand {
    /// Deepest level to print: author, area, type or pid [default: from config]
    #[arg(long, value_parser = parse_level)]
    pub depth: Option<Level>,

    /// Output the full hierarchy as JSON
    #[arg(long)]
    pub json: bool,

    /// Record source overrides.
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `dbtree index`.
#[derive(Args, Debug, Clone)]
pub struct IndexCommand {
    /// Record source overrides.
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `dbtree search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Free-text query (Tantivy query syntax)
    #[arg(default_value = "")]
    pub text: String,

    /// Restrict to a report type: results, surgery, emergency or note (repeatable)
    #[arg(short = 'f', long = "filter", value_name = "TYPE")]
    pub filters: Vec<FilterTag>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Print the whole hierarchy with matches emphasized
    #[arg(long, conflicts_with = "json")]
    pub tree: bool,

    /// Record source overrides.
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `dbtree show`.
#[derive(Args, Debug, Clone)]
pub struct ShowCommand {
    /// Document pid
    pub pid: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Record source overrides.
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Supported `dbtree` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize dbtree configuration in the current directory
    Init(InitCommand),

    /// Print the record hierarchy
    Tree(TreeCommand),

    /// Rebuild the search index for the database
    Index(IndexCommand),

    /// Highlight the leaves matching a query
    #[command(after_help = "\
QUERY SYNTAX:
  term              Term may appear
  term1 term2       Either term
  +term             Term must appear
  -term             Term must NOT appear
  \"phrase\"          Exact phrase match
  field:term        Search one field (area, authname, title, type, parsed, ...)

FILTERS:
  --filter surgery --filter note   becomes   (type:SURG type:NOTE ) AND <text>")]
    Search(SearchCommand),

    /// Show the stored record for a pid
    Show(ShowCommand),

    /// Show configuration, record source and index statistics
    Status,

    /// Show effective configuration settings
    Config,

    /// Validate configuration and the record source
    Check,
}

/// Parses a hierarchy level for `--depth`; the root is not a useful depth.
fn parse_level(s: &str) -> Result<Level, String> {
    match s.parse()? {
        Level::Root => Err("depth must be author, area, type or pid".to_string()),
        level => Ok(level),
    }
}
