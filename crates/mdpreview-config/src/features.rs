//! Feature flags configuration.
//!
//! This module contains the `FeaturesConfig` struct which holds
//! the switches for optional markdown constructs.

use serde::{Deserialize, Serialize};

/// Feature flags configuration.
///
/// Controls which optional constructs the renderer recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeaturesConfig {
    /// Render `~~text~~` as `<del>`.
    /// Default: true
    #[serde(default = "default_true")]
    pub strikethrough: bool,

    /// Render `![alt](url)` as `<img>`.
    /// Default: true
    #[serde(default = "default_true")]
    pub images: bool,

    /// Render `[text](url)` as `<a>`.
    /// Default: true
    #[serde(default = "default_true")]
    pub links: bool,

    /// Render pipe-delimited rows as `<table>`.
    /// Default: true
    #[serde(default = "default_true")]
    pub tables: bool,

    /// Accept `+ item` as a list marker alongside `*`, `-` and `1.`.
    /// Default: true
    #[serde(default = "default_true")]
    pub plus_bullets: bool,

    /// Emit the fence language as `class="language-..."` on `<code>`.
    /// Default: false (the language tag is dropped)
    #[serde(default)]
    pub language_class: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            strikethrough: true,
            images: true,
            links: true,
            tables: true,
            plus_bullets: true,
            language_class: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let features = FeaturesConfig::default();
        assert!(features.strikethrough);
        assert!(features.images);
        assert!(features.links);
        assert!(features.tables);
        assert!(features.plus_bullets);
        assert!(!features.language_class);
    }

    #[test]
    fn test_serde_pascal_case() {
        let toml_str = r#"
            Strikethrough = false
            Images = false
            Links = false
            Tables = false
            PlusBullets = false
            LanguageClass = true
        "#;

        let features: FeaturesConfig = toml::from_str(toml_str).unwrap();
        assert!(!features.strikethrough);
        assert!(!features.images);
        assert!(!features.links);
        assert!(!features.tables);
        assert!(!features.plus_bullets);
        assert!(features.language_class);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let features: FeaturesConfig = toml::from_str("Tables = false").unwrap();
        assert!(!features.tables);
        assert!(features.links);
        assert!(!features.language_class);
    }
}
