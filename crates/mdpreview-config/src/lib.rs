//! mdpreview Config
//!
//! This crate handles configuration loading and management
//! for mdpreview, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/mdpreview/config.toml`
//! - macOS: `~/Library/Application Support/mdpreview/config.toml`
//! - Windows: `%APPDATA%\mdpreview\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use mdpreview_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./custom.toml")).unwrap();
//! ```

mod features;
mod output;

pub use features::FeaturesConfig;
pub use output::{OutputConfig, DEFAULT_PLACEHOLDER};

use mdpreview_core::{MdPreviewError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default TOML configuration string.
///
/// Written to disk by [`Config::ensure_config_file`]; must stay in sync
/// with the `Default` impls of the sections.
const DEFAULT_TOML: &str = r#"[features]
Strikethrough = true
Images        = true
Links         = true
Tables        = true
PlusBullets   = true
LanguageClass = false

[output]
Placeholder = "Start typing to see the preview..."
LinkTarget  = "_blank"
Title       = "Preview"
"#;

/// Main configuration structure.
///
/// Contains all configuration sections for mdpreview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Feature flags configuration
    #[serde(default)]
    pub features: FeaturesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use mdpreview_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[features]"));
    /// assert!(toml.contains("[output]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mdpreview")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Ensures the config file exists, creating it with defaults if not.
    ///
    /// # Returns
    ///
    /// The path to the config file.
    pub fn ensure_config_file() -> Result<PathBuf> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| MdPreviewError::Config("Could not determine config directory".into()))?;

        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_TOML)?;
        }

        Ok(config_path)
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mdpreview_config::Config;
    /// use std::path::Path;
    /// let config = Config::load_from(Path::new("./config.toml")).unwrap();
    /// ```
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            MdPreviewError::Config(format!("Parse error in {}: {}", path.display(), e))
        })
    }

    /// Parse configuration from an inline TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| MdPreviewError::Config(format!("Parse error: {}", e)))
    }

    /// Load configuration with an optional override file or string.
    ///
    /// 1. Load the base config from the default location
    /// 2. If `override_config` names an existing file, merge its keys
    /// 3. Otherwise treat it as inline TOML and merge that
    ///
    /// Only keys present in the override replace loaded values.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mdpreview_config::Config;
    ///
    /// let config = Config::load_with_override(Some("[features]\nTables = false")).unwrap();
    /// assert!(!config.features.tables);
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;

        if let Some(override_str) = override_config {
            config.merge(&Self::parse_override(override_str)?)?;
        }

        Ok(config)
    }

    /// Resolve an override argument: an existing file path or inline TOML.
    ///
    /// The result is the raw table, so keys the override leaves out can be
    /// told apart from keys set to their default.
    pub fn parse_override(override_str: &str) -> Result<toml::Table> {
        let override_path = Path::new(override_str);
        if override_path.is_file() {
            let content = std::fs::read_to_string(override_path)?;
            content.parse::<toml::Table>().map_err(|e| {
                MdPreviewError::Config(format!("Parse error in {}: {}", override_path.display(), e))
            })
        } else {
            override_str
                .parse::<toml::Table>()
                .map_err(|e| MdPreviewError::Config(format!("Override parse error: {}", e)))
        }
    }

    /// Merge an override table into this config.
    ///
    /// Keys present in `overlay` take precedence; everything else keeps its
    /// current value.
    ///
    /// # Example
    ///
    /// ```
    /// use mdpreview_config::Config;
    ///
    /// let mut base = Config::from_toml_str("[output]\nLinkTarget = \"_self\"").unwrap();
    /// let overlay = Config::parse_override("[features]\nLinks = false").unwrap();
    ///
    /// base.merge(&overlay).unwrap();
    /// assert!(!base.features.links);
    /// assert_eq!(base.output.link_target, "_self");
    /// ```
    pub fn merge(&mut self, overlay: &toml::Table) -> Result<()> {
        let mut table = match toml::Value::try_from(&*self) {
            Ok(toml::Value::Table(table)) => table,
            Ok(_) => return Err(MdPreviewError::Config("Config is not a table".into())),
            Err(e) => return Err(MdPreviewError::Config(format!("Serialization error: {}", e))),
        };
        merge_tables(&mut table, overlay);

        *self = toml::Value::Table(table)
            .try_into()
            .map_err(|e| MdPreviewError::Config(format!("Override error: {}", e)))?;
        Ok(())
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| MdPreviewError::Config(format!("Serialization error: {}", e)))?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}

/// Recursively copy `overlay` into `base`, descending into shared tables.
fn merge_tables(base: &mut toml::Table, overlay: &toml::Table) {
    for (key, value) in overlay {
        if let (Some(toml::Value::Table(inner)), toml::Value::Table(over)) =
            (base.get_mut(key), value)
        {
            merge_tables(inner, over);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.features.links);
        assert!(config.features.images);
        assert!(!config.features.language_class);
        assert_eq!(config.output.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_default_toml_matches_default() {
        let config: Config = toml::from_str(DEFAULT_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge() {
        let mut base = Config::default();
        assert!(base.features.links);

        let overlay = Config::parse_override(
            r#"
            [features]
            Links = false
            [output]
            LinkTarget = "_self"
        "#,
        )
        .unwrap();

        base.merge(&overlay).unwrap();
        assert!(!base.features.links);
        assert_eq!(base.output.link_target, "_self");
    }

    #[test]
    fn test_merge_keeps_unset_keys() {
        let mut base = Config::from_toml_str(
            r#"
            [features]
            Images = false
            [output]
            LinkTarget = ""
        "#,
        )
        .unwrap();

        let overlay = Config::parse_override("[features]\nTables = false").unwrap();
        base.merge(&overlay).unwrap();

        assert!(!base.features.tables);
        assert!(!base.features.images);
        assert!(base.output.link_target.is_empty());
        assert_eq!(base.output.title, "Preview");
    }

    #[test]
    fn test_merge_rejects_wrong_type() {
        let mut base = Config::default();
        let overlay = Config::parse_override("[features]\nTables = \"no\"").unwrap();
        let err = base.merge(&overlay).unwrap_err();
        assert!(matches!(err, MdPreviewError::Config(_)));
        assert!(base.features.tables);
    }

    #[test]
    fn test_parse_override_inline() {
        let table = Config::parse_override("[features]\nTables = false").unwrap();
        assert_eq!(
            table["features"]["Tables"],
            toml::Value::Boolean(false)
        );
        assert!(!table.contains_key("output"));
    }

    #[test]
    fn test_parse_override_file() {
        let path = std::env::temp_dir().join(format!(
            "mdpreview-override-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[output]\nTitle = \"Notes\"").unwrap();

        let mut config = Config::default();
        let overlay = Config::parse_override(&path.display().to_string()).unwrap();
        std::fs::remove_file(&path).unwrap();
        config.merge(&overlay).unwrap();

        assert_eq!(config.output.title, "Notes");
        assert!(config.features.links);
    }

    #[test]
    fn test_parse_override_invalid() {
        let err = Config::parse_override("[features\nTables = ").unwrap_err();
        assert!(matches!(err, MdPreviewError::Config(_)));
    }

    #[test]
    fn test_load_from_invalid_names_file() {
        let path = std::env::temp_dir().join(format!(
            "mdpreview-invalid-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[features\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        match err {
            MdPreviewError::Config(msg) => assert!(msg.contains("mdpreview-invalid-test")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_path() {
        // On CI/containers this might be None, so we just check it doesn't panic
        if let Some(p) = Config::config_path() {
            assert!(p.to_string_lossy().contains("mdpreview"));
        }
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "mdpreview-config-test-{}.toml",
            std::process::id()
        ));
        let mut config = Config::default();
        config.output.title = "Saved".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.output.title, "Saved");
    }
}
