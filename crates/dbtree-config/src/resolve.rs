//! Path resolution for configured file paths.
//!
//! Paths in a config file are relative to that file's directory. `~` expands to the home
//! directory. The file itself need not exist yet; validation reports missing files.

use std::path::{self, Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path to an absolute path.
///
/// - `~` and `~/...` expand to the home directory
/// - relative paths are joined onto `config_dir`
/// - absolute paths are kept
pub fn resolve_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    };
    path::absolute(&joined).map_err(|source| ConfigError::PathResolution {
        path: joined,
        source,
    })
}

/// Renders `path` relative to `base` when that is shorter to read, else as-is.
pub fn display_path(path: &Path, base: &Path) -> String {
    match pathdiff::diff_paths(path, base) {
        Some(relative) if !relative.starts_with("..") && !relative.as_os_str().is_empty() => {
            relative.display().to_string()
        }
        _ => path.display().to_string(),
    }
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_resolve_relative_path() {
        let test_dir = TestDir::new();
        let resolved = resolve_path("exports/records.xml", test_dir.path()).unwrap();
        assert_eq!(resolved, test_dir.path().join("exports/records.xml"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_resolve_does_not_require_existence() {
        let test_dir = TestDir::new();
        let resolved = resolve_path("./missing.xml", test_dir.path()).unwrap();
        assert!(!resolved.exists());
    }

    #[test]
    fn test_resolve_absolute_path_ignores_config_dir() {
        let resolved = resolve_path("/data/records.xml", Path::new("/other")).unwrap();
        assert_eq!(resolved, PathBuf::from("/data/records.xml"));
    }

    #[test]
    fn test_expand_tilde() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(expand_tilde("~").unwrap(), home);
        assert_eq!(expand_tilde("~/exports/a.xml").unwrap(), home.join("exports/a.xml"));
        assert_eq!(expand_tilde("a/~/b").unwrap(), PathBuf::from("a/~/b"));
    }

    #[test]
    fn test_display_path_relative_inside_base() {
        let base = Path::new("/work/hospital");
        assert_eq!(
            display_path(Path::new("/work/hospital/.dbtree.toml"), base),
            ".dbtree.toml"
        );
    }

    #[test]
    fn test_display_path_absolute_outside_base() {
        let base = Path::new("/work/hospital");
        assert_eq!(
            display_path(Path::new("/home/me/.dbtree.toml"), base),
            "/home/me/.dbtree.toml"
        );
    }
}
