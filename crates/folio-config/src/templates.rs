//! Starter files written by `folio init`.
//!
//! Each template is kept as working TOML so it stays parseable, and handed out with
//! every setting commented so a fresh file changes nothing until edited.

/// Collection-level settings.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// User-wide settings.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Starter `.folio.toml` for a collection directory.
pub fn local_template() -> String {
    commented(LOCAL_TEMPLATE)
}

/// Starter `~/.folio.toml`.
pub fn global_template() -> String {
    commented(GLOBAL_TEMPLATE)
}

/// Prefixes every setting line with `# `; comments and blank lines pass through.
fn commented(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}
