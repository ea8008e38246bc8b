//! Integration tests for folio-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> resolve -> merge.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use folio_config::{Config, ConfigError, ConfigWarning};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_root_config_only() {
    let env = TestEnv::new();
    env.create_file(".folio.toml", "root = true\n");

    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.search.fragment_length, 200);
    assert_eq!(config.display.hit_metadata, vec!["MD_TITLE"]);
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
}

#[test]
fn test_load_nested_configs_merging() {
    let env = TestEnv::new();
    let texts = env.create_dir("collection/texts");
    let subdir = env.create_dir("collection/sub");

    env.create_file(
        ".folio.toml",
        r#"
root = true

[search]
fragment_length = 300
locales = ["en", "de"]

[display]
ignore_fields = ["MD_SHELFMARK"]
"#,
    );
    env.create_file(
        "collection/.folio.toml",
        r#"
[search]
fragment_length = 120

[display]
translate_fields = "MD_LANGUAGE"

[files]
text_root = "texts"
"#,
    );

    let config = Config::load(&subdir).unwrap();

    assert_eq!(config.search.fragment_length, 120);
    assert_eq!(config.search.locales, vec!["en", "de"]);
    assert_eq!(config.display.ignore_fields, vec!["MD_SHELFMARK"]);
    assert_eq!(config.display.translate_fields, vec!["MD_LANGUAGE"]);
    assert_eq!(config.files.text_root, Some(texts.canonicalize().unwrap()));
    assert_eq!(
        config.config_root.as_deref(),
        Some(env.path().join("collection").as_path())
    );
    assert!(config.validate().is_empty());
}

#[test]
fn test_load_error_invalid_toml() {
    let env = TestEnv::new();
    env.create_file(".folio.toml", "root = true\n[search\n");

    let result = Config::load(env.path());
    assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
}

#[test]
fn test_load_from_files_empty_list() {
    let config = Config::load_from_files(&[]).unwrap();
    assert!(config.config_root.is_none());
    assert_eq!(config.search.default_locale, "en");
}

#[test]
fn test_load_from_files_precedence() {
    let env = TestEnv::new();
    let high = env.create_file("a/.folio.toml", "[export]\nfields = \"PI\"\n");
    let low = env.create_file(
        "b/.folio.toml",
        "[export]\nfields = [\"MD_TITLE\", \"LABEL\"]\n[search]\nproximity_distance = 2\n",
    );

    let config = Config::load_from_files(&[high, low]).unwrap();
    assert_eq!(config.export.fields, vec!["PI"]);
    assert_eq!(config.search.proximity_distance, 2);
}

#[test]
fn test_load_from_missing_file() {
    let env = TestEnv::new();
    let result = Config::load_from_files(&[env.path().join("nope.toml")]);
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn test_validate_reports_missing_text_root() {
    let env = TestEnv::new();
    env.create_file(
        ".folio.toml",
        "root = true\n[files]\ntext_root = \"./absent\"\n",
    );

    let config = Config::load(env.path()).unwrap();
    let warnings = config.validate();
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], ConfigWarning::TextRootMissing { .. }));
}

#[test]
fn test_settings_round_trip_through_toml() {
    let env = TestEnv::new();
    env.create_file(
        ".folio.toml",
        "root = true\n[display]\none_line_fields = [\"MD_PLACE\"]\n",
    );
    let config = Config::load(env.path()).unwrap();
    let rendered = config.settings_to_toml().unwrap();

    let copy = env.create_file("copy/.folio.toml", &format!("root = true\n{rendered}"));
    let reloaded = Config::load_from_files(&[copy]).unwrap();
    assert_eq!(reloaded.display.one_line_fields, vec!["MD_PLACE"]);
    assert_eq!(reloaded.search.fragment_length, config.search.fragment_length);
}
