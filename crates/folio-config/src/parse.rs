//! Configuration file parsing.
//!
//! Parses individual `.folio.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Search and highlighting settings.
    pub search: Option<RawSearchSettings>,
    /// Metadata display settings.
    pub display: Option<RawDisplaySettings>,
    /// Export settings.
    pub export: Option<RawExportSettings>,
    /// Transcription file settings.
    pub files: Option<RawFileSettings>,
}

/// Raw search settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Maximum fragment length in characters.
    pub fragment_length: Option<usize>,
    /// Default proximity distance for phrase terms.
    pub proximity_distance: Option<u32>,
    /// Search-term keys that apply to every metadata field.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub catch_all_fields: Option<Vec<String>>,
    /// Locales hit labels are translated into.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub locales: Option<Vec<String>>,
    /// Locale used when a request names none.
    pub default_locale: Option<String>,
}

/// Raw display settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDisplaySettings {
    /// Fields never shown as found metadata.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub ignore_fields: Option<Vec<String>>,
    /// Fields whose values are translation keys.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub translate_fields: Option<Vec<String>>,
    /// Fields whose values are joined into a single entry.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub one_line_fields: Option<Vec<String>>,
    /// Fields capped to their first matching value.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub capped_fields: Option<Vec<String>>,
    /// Fields a hit already displays on its own.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub hit_metadata: Option<Vec<String>>,
}

/// Raw export settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExportSettings {
    /// Fields copied into export metadata.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub fields: Option<Vec<String>>,
}

/// Raw file settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFileSettings {
    /// Directory transcription files are read from, as written in the file.
    pub text_root: Option<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
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

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.search.is_none());
        assert!(config.display.is_none());
        assert!(config.export.is_none());
        assert!(config.files.is_none());
    }

    #[test]
    fn test_parse_search_settings() {
        let toml = r#"
[search]
fragment_length = 120
proximity_distance = 3
locales = ["en", "de"]
default_locale = "de"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let search = config.search.unwrap();
        assert_eq!(search.fragment_length, Some(120));
        assert_eq!(search.proximity_distance, Some(3));
        assert_eq!(search.locales, Some(vec!["en".into(), "de".into()]));
        assert_eq!(search.default_locale.as_deref(), Some("de"));
        assert!(search.catch_all_fields.is_none());
    }

    #[test]
    fn test_parse_single_string_list() {
        let toml = r#"
[display]
ignore_fields = "MD_SHELFMARK"
hit_metadata = ["MD_TITLE", "MD_CREATOR"]
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let display = config.display.unwrap();
        assert_eq!(display.ignore_fields, Some(vec!["MD_SHELFMARK".into()]));
        assert_eq!(
            display.hit_metadata,
            Some(vec!["MD_TITLE".into(), "MD_CREATOR".into()])
        );
        assert!(display.translate_fields.is_none());
    }

    #[test]
    fn test_parse_export_and_files() {
        let toml = r#"
[export]
fields = "MD_TITLE"

[files]
text_root = "./data"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.export.unwrap().fields, Some(vec!["MD_TITLE".into()]));
        assert_eq!(config.files.unwrap().text_root.as_deref(), Some("./data"));
    }

    #[test]
    fn test_parse_root_flag() {
        let config = parse_config_str("root = true\n", Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config_str("[search\n", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_parse_wrong_type() {
        let result = parse_config_str(
            "[search]\nfragment_length = \"long\"\n",
            Path::new("bad.toml"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_is_root_config_unreadable() {
        assert!(!is_root_config(Path::new("/nonexistent/.folio.toml")));
    }
}
