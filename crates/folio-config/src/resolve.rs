//! Path resolution for configured directories.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured directory to an absolute path.
///
/// - Tilde paths (`~/texts`) expand to the home directory
/// - Relative paths (`./texts`, `../shared`) resolve against `config_dir`
/// - Absolute paths are returned as-is
///
/// The directory is not required to exist; validation reports a missing one.
pub fn resolve_dir(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    };
    Ok(absolute.canonicalize().unwrap_or(absolute))
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
        let texts = test_dir.create_dir("texts");

        let resolved = resolve_dir("./texts", test_dir.path()).unwrap();
        assert_eq!(resolved, texts.canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_parent_relative_path() {
        let test_dir = TestDir::new();
        let shared = test_dir.create_dir("shared/texts");
        let project = test_dir.create_dir("project");

        let resolved = resolve_dir("../shared/texts", &project).unwrap();
        assert_eq!(resolved, shared.canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_absolute_path() {
        let test_dir = TestDir::new();
        let texts = test_dir.create_dir("texts").canonicalize().unwrap();

        let resolved = resolve_dir(texts.to_str().unwrap(), Path::new("/other")).unwrap();
        assert_eq!(resolved, texts);
    }

    #[test]
    fn test_resolve_missing_path_is_kept() {
        let test_dir = TestDir::new();
        let resolved = resolve_dir("missing", test_dir.path()).unwrap();
        assert!(resolved.ends_with("missing"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_expand_tilde() {
        let home = home_dir().unwrap();
        assert_eq!(expand_tilde("~").unwrap(), home);
        assert_eq!(expand_tilde("~/texts").unwrap(), home.join("texts"));
        assert_eq!(expand_tilde("texts").unwrap(), PathBuf::from("texts"));
    }
}
