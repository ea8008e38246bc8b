//! Configuration file discovery.
//!
//! A collection's settings live in `.folio.toml` files anywhere between the working
//! directory and the filesystem root, plus an optional `~/.folio.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".folio.toml";

/// Returns the config files that apply to `cwd`, closest first.
///
/// The ancestor walk ends at a file declaring `root = true`; such a file also
/// shuts out the global config. Otherwise `~/.folio.toml` comes last, once.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stops = is_root_config(&candidate);
        configs.push(candidate);
        if stops {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        configs.push(global);
    }
    configs
}

/// Path of the global config, `~/.folio.toml`, if a home directory is known.
pub fn global_config_path() -> Option<PathBuf> {
    let dirs = BaseDirs::new()?;
    Some(dirs.home_dir().join(CONFIG_FILENAME))
}

/// Whether `path` is the global config.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| global == path)
}
