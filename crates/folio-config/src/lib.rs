//! Configuration system for folio.
//!
//! folio uses TOML configuration files named `.folio.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.folio.toml` files found, then loading `~/.folio.toml` as the global config with lowest
//! precedence.

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
    RawConfig, RawDisplaySettings, RawExportSettings, RawFileSettings, RawSearchSettings,
    parse_config_file, parse_config_str,
};
pub use resolve::resolve_dir;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for folio.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Search and highlighting settings.
    pub search: SearchSettings,
    /// Metadata display settings.
    pub display: DisplaySettings,
    /// Export settings.
    pub export: ExportSettings,
    /// Transcription file settings.
    pub files: FileSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.folio.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
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

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.folio.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            search: self.search.clone(),
            display: self.display.clone(),
            export: self.export.clone(),
            files: SerializableFileSettings {
                text_root: self
                    .files
                    .text_root
                    .as_ref()
                    .map(|p| p.display().to_string()),
            },
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Search and highlighting settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum characters in a full-text fragment.
    pub fragment_length: usize,
    /// Default token distance for phrase terms (0 = exact phrases).
    pub proximity_distance: u32,
    /// Search-term keys whose terms apply to every metadata field.
    pub catch_all_fields: Vec<String>,
    /// Locales labels are translated into.
    pub locales: Vec<String>,
    /// Locale used when a request names none.
    pub default_locale: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fragment_length: 200,
            proximity_distance: 0,
            catch_all_fields: vec!["DEFAULT".into(), "NORMDATATERMS".into()],
            locales: vec!["en".into()],
            default_locale: String::from("en"),
        }
    }
}

/// Settings controlling which found metadata a hit shows and how.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Fields never listed as found metadata.
    pub ignore_fields: Vec<String>,
    /// Fields whose values are translation keys.
    pub translate_fields: Vec<String>,
    /// Fields whose values are joined into one entry.
    pub one_line_fields: Vec<String>,
    /// Fields capped to their first matching value.
    pub capped_fields: Vec<String>,
    /// Fields a hit already displays on its own.
    pub hit_metadata: Vec<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            ignore_fields: Vec::new(),
            translate_fields: Vec::new(),
            one_line_fields: Vec::new(),
            capped_fields: vec!["NORM_ALTNAME".into()],
            hit_metadata: vec!["MD_TITLE".into()],
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Fields copied raw into a hit's export metadata.
    pub fields: Vec<String>,
}

/// Transcription file settings.
#[derive(Debug, Clone, Default)]
pub struct FileSettings {
    /// Resolved directory transcription files are read from.
    pub text_root: Option<PathBuf>,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Search settings.
    search: SearchSettings,
    /// Display settings.
    display: DisplaySettings,
    /// Export settings.
    export: ExportSettings,
    /// File settings.
    files: SerializableFileSettings,
}

/// File settings with the text root rendered as a string.
#[derive(Serialize)]
struct SerializableFileSettings {
    /// Resolved text root, omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    text_root: Option<String>,
}
