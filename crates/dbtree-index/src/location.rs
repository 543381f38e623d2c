//! Index location resolution.
//!
//! The index lives in `.dbtree/index/` next to the most specific `.dbtree.toml`. With only
//! the global config present that is `~/.dbtree/index/`.

use std::path::{Path, PathBuf};

use dbtree_config::Config;

/// Directory name for dbtree data (sibling to `.dbtree.toml`).
pub const DATA_DIR: &str = ".dbtree";
/// Subdirectory within the data directory for the index.
const INDEX_DIR: &str = "index";

/// Computes the index directory for a configuration, or `None` without any config file.
pub fn index_directory(config: &Config) -> Option<PathBuf> {
    config
        .config_root
        .as_ref()
        .map(|root| root.join(DATA_DIR).join(INDEX_DIR))
}

/// Returns true if an index has been committed at `path`.
pub fn index_exists(path: &Path) -> bool {
    path.join("meta.json").is_file()
}
