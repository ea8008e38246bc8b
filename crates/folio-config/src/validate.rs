//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Fragments would always be empty.
    ZeroFragmentLength,
    /// The default locale is not among the configured locales.
    DefaultLocaleNotListed {
        /// The default locale.
        locale: String,
    },
    /// A field is ignored but also configured for display handling.
    IgnoredFieldConfigured {
        /// The field name.
        field: String,
        /// The display setting that names it.
        setting: &'static str,
    },
    /// The text root does not exist.
    TextRootMissing {
        /// Configured path.
        path: String,
    },
    /// The text root exists but is not a directory.
    TextRootNotDirectory {
        /// Configured path.
        path: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFragmentLength => {
                write!(f, "search.fragment_length is 0; fragments will be empty")
            }
            Self::DefaultLocaleNotListed { locale } => {
                write!(f, "default locale '{locale}' is not in search.locales")
            }
            Self::IgnoredFieldConfigured { field, setting } => {
                write!(
                    f,
                    "field '{field}' is in display.ignore_fields and display.{setting}"
                )
            }
            Self::TextRootMissing { path } => {
                write!(f, "text root does not exist: {path}")
            }
            Self::TextRootNotDirectory { path } => {
                write!(f, "text root is not a directory: {path}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.search.fragment_length == 0 {
        warnings.push(ConfigWarning::ZeroFragmentLength);
    }

    let search = &config.search;
    if !search.locales.contains(&search.default_locale) {
        warnings.push(ConfigWarning::DefaultLocaleNotListed {
            locale: search.default_locale.clone(),
        });
    }

    let display = &config.display;
    let handled = [
        ("translate_fields", &display.translate_fields),
        ("one_line_fields", &display.one_line_fields),
    ];
    for field in &display.ignore_fields {
        for (setting, fields) in handled {
            if fields.contains(field) {
                warnings.push(ConfigWarning::IgnoredFieldConfigured {
                    field: field.clone(),
                    setting,
                });
            }
        }
    }

    if let Some(ref root) = config.files.text_root {
        if !root.exists() {
            warnings.push(ConfigWarning::TextRootMissing {
                path: root.display().to_string(),
            });
        } else if !root.is_dir() {
            warnings.push(ConfigWarning::TextRootNotDirectory {
                path: root.display().to_string(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn test_validate_zero_fragment_length() {
        let mut config = Config::default();
        config.search.fragment_length = 0;
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::ZeroFragmentLength]
        );
    }

    #[test]
    fn test_validate_default_locale() {
        let mut config = Config::default();
        config.search.default_locale = "fr".into();
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::DefaultLocaleNotListed {
                locale: "fr".into()
            }]
        );
    }

    #[test]
    fn test_validate_ignored_and_translated() {
        let mut config = Config::default();
        config.display.ignore_fields = vec!["MD_LANG".into()];
        config.display.translate_fields = vec!["MD_LANG".into()];
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::IgnoredFieldConfigured {
                field: "MD_LANG".into(),
                setting: "translate_fields",
            }]
        );
    }

    #[test]
    fn test_validate_text_root() {
        let test_dir = TestDir::new();
        let mut config = Config::default();

        config.files.text_root = Some(test_dir.path().join("missing"));
        assert!(matches!(
            validate_config(&config).as_slice(),
            [ConfigWarning::TextRootMissing { .. }]
        ));

        let file = test_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        config.files.text_root = Some(file);
        assert!(matches!(
            validate_config(&config).as_slice(),
            [ConfigWarning::TextRootNotDirectory { .. }]
        ));

        config.files.text_root = Some(test_dir.create_dir("texts"));
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::IgnoredFieldConfigured {
            field: "MD_X".into(),
            setting: "one_line_fields",
        };
        assert_eq!(
            warning.to_string(),
            "field 'MD_X' is in display.ignore_fields and display.one_line_fields"
        );
    }
}
