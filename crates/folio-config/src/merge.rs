//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying
//! precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, DisplaySettings, ExportSettings, FileSettings, SearchSettings,
    parse::{RawConfig, RawDisplaySettings, RawSearchSettings},
    resolve::resolve_dir,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Returns the directory holding the config file.
    fn dir(&self) -> Result<&Path, ConfigError> {
        self.path
            .parent()
            .ok_or_else(|| ConfigError::NoParentDirectory {
                path: self.path.clone(),
            })
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs are given highest precedence first (closest to the working directory) and
/// the global config last. Each scalar takes the first defined value; a list setting is
/// replaced wholesale by the highest-precedence file that sets it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(first) = configs.first() else {
        return Ok(Config::default());
    };

    let mut search = SearchSettings::default();
    let mut display = DisplaySettings::default();
    let mut export = ExportSettings::default();
    let mut files = FileSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
        if let Some(ref raw) = parsed.config.display {
            apply_raw_display(&mut display, raw);
        }
        if let Some(ref raw) = parsed.config.export
            && let Some(ref fields) = raw.fields
        {
            export.fields.clone_from(fields);
        }
        if let Some(ref raw) = parsed.config.files
            && let Some(ref text_root) = raw.text_root
        {
            files.text_root = Some(resolve_dir(text_root, parsed.dir()?)?);
        }
    }

    Ok(Config {
        search,
        display,
        export,
        files,
        config_root: Some(first.dir()?.to_path_buf()),
    })
}

/// Applies raw search settings to result, overwriting any present values.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.fragment_length {
        result.fragment_length = v;
    }
    if let Some(v) = raw.proximity_distance {
        result.proximity_distance = v;
    }
    if let Some(ref v) = raw.catch_all_fields {
        result.catch_all_fields.clone_from(v);
    }
    if let Some(ref v) = raw.locales {
        result.locales.clone_from(v);
    }
    if let Some(ref v) = raw.default_locale {
        result.default_locale.clone_from(v);
    }
}

/// Applies raw display settings to result.
fn apply_raw_display(result: &mut DisplaySettings, raw: &RawDisplaySettings) {
    let lists = [
        (&mut result.ignore_fields, &raw.ignore_fields),
        (&mut result.translate_fields, &raw.translate_fields),
        (&mut result.one_line_fields, &raw.one_line_fields),
        (&mut result.capped_fields, &raw.capped_fields),
        (&mut result.hit_metadata, &raw.hit_metadata),
    ];
    for (target, value) in lists {
        if let Some(value) = value {
            target.clone_from(value);
        }
    }
}
