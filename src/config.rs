//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the site root, the
//! directory that also holds `style.css`, `assets/` and `.nojekyll`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! url = "http://localhost:8000"   # Where the archive is published
//! html_root = ""                  # Path prefix under `url` (e.g. "archive")
//! title = "Chat Archive"
//!
//! [platform]
//! url = "https://chat.example.com"
//! icon_url = "https://chat.example.com/static/images/logo/favicon.png"
//!
//! [page]
//! head_html = ""                  # Empty: generated from site.title, links style.css
//! footer_html = "\n</html>\n"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [site]
//! url = "https://archive.example.org"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file within the site root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where and under which title the archive is published.
    pub site: SiteSection,
    /// The chat server the export came from.
    pub platform: PlatformSection,
    /// Raw HTML framing shared by every page.
    pub page: PageSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Absolute base URL of the published archive.
    pub url: String,
    /// Path prefix under `url`. Empty when the archive sits at the root.
    pub html_root: String,
    /// Site title, shown in page titles and the default page head.
    pub title: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            html_root: String::new(),
            title: "Chat Archive".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformSection {
    /// Base URL of the chat server; messages link back to it.
    pub url: String,
    /// Icon shown next to each "view on the chat server" link.
    pub icon_url: String,
}

impl Default for PlatformSection {
    fn default() -> Self {
        Self {
            url: "https://chat.example.com".to_string(),
            icon_url: "https://chat.example.com/static/images/logo/favicon.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageSection {
    /// HTML written at the top of every page except topic pages.
    /// Empty means "generate from `site.title`", stylesheet link included.
    pub head_html: String,
    /// HTML written at the very end of every page.
    pub footer_html: String,
}

impl Default for PageSection {
    fn default() -> Self {
        Self {
            head_html: String::new(),
            footer_html: "\n</html>\n".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_absolute_url("site.url", &self.site.url)?;
        validate_absolute_url("platform.url", &self.platform.url)?;
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn validate_absolute_url(key: &str, value: &str) -> Result<(), ConfigError> {
    match url::Url::parse(value) {
        Ok(parsed) if !parsed.cannot_be_a_base() => Ok(()),
        Ok(_) => Err(ConfigError::Validation(format!(
            "{key} must be a base URL, got {value:?}"
        ))),
        Err(e) => Err(ConfigError::Validation(format!(
            "{key} must be an absolute URL, got {value:?}: {e}"
        ))),
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Chat Archive Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to style.css, assets/ and .nojekyll (the --site-root
# directory). Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Published site
# ---------------------------------------------------------------------------
[site]
# Absolute URL the archive is served from. Used for canonical stream/topic
# links and the stylesheet reference on topic pages.
url = "http://localhost:8000"

# Path prefix under `url`, e.g. "archive" for https://example.org/archive/.
html_root = ""

# Shown in every page title.
title = "Chat Archive"

# ---------------------------------------------------------------------------
# Source chat server
# ---------------------------------------------------------------------------
[platform]
# Messages and topics link back to their originals here.
url = "https://chat.example.com"

# Small icon shown next to each link back to the chat server.
icon_url = "https://chat.example.com/static/images/logo/favicon.png"

# ---------------------------------------------------------------------------
# Page framing
# ---------------------------------------------------------------------------
[page]
# Raw HTML opening every index and stream page. Leave empty to generate a
# minimal head from site.title that links style.css; a custom head must link
# the stylesheet itself. Topic pages always get their own title.
head_html = ""

# Raw HTML closing every page.
footer_html = """

</html>
"""
"##
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.site.title, "Chat Archive");
        assert_eq!(config.site.html_root, "");
        assert_eq!(config.page.footer_html, "\n</html>\n");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[site]
url = "https://archive.example.org"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.site.url, "https://archive.example.org");
        // Defaults preserved
        assert_eq!(config.site.title, "Chat Archive");
        assert_eq!(config.platform.url, "https://chat.example.com");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
[site]
titel = "typo"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn merge_overlay_keeps_unrelated_defaults() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[page]\nhead_html = \"<html>\"").unwrap();
        let merged: SiteConfig = merge_toml(base, overlay).try_into().unwrap();
        assert_eq!(merged.page.head_html, "<html>");
        assert_eq!(merged.page.footer_html, "\n</html>\n");
        assert_eq!(merged.site.url, "http://localhost:8000");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Chat Archive");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[site]
url = "https://example.org"
html_root = "archive"
title = "Team History"

[platform]
url = "https://team.chat.example"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.url, "https://example.org");
        assert_eq!(config.site.html_root, "archive");
        assert_eq!(config.site.title, "Team History");
        assert_eq!(config.platform.url, "https://team.chat.example");
        // Unspecified values should be defaults
        assert_eq!(
            config.platform.icon_url,
            "https://chat.example.com/static/images/logo/favicon.png"
        );
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn relative_site_url_fails_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[site]\nurl = \"archive/\"\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn empty_title_fails_validation() {
        let mut config = SiteConfig::default();
        config.site.title = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.url, defaults.site.url);
        assert_eq!(config.site.title, defaults.site.title);
        assert_eq!(config.platform.icon_url, defaults.platform.icon_url);
        assert_eq!(config.page.head_html, defaults.page.head_html);
        assert_eq!(config.page.footer_html, defaults.page.footer_html);
    }
}
