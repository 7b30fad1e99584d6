//! Output configuration.
//!
//! Text and attribute choices for the generated HTML.

use serde::{Deserialize, Serialize};

/// Placeholder shown when the document is empty.
pub const DEFAULT_PLACEHOLDER: &str = "Start typing to see the preview...";

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputConfig {
    /// Text of the empty-state fragment.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// `target` attribute for links. Empty omits the attribute.
    #[serde(default = "default_link_target")]
    pub link_target: String,

    /// `<title>` of standalone documents.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            link_target: default_link_target(),
            title: default_title(),
        }
    }
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_link_target() -> String {
    "_blank".to_string()
}

fn default_title() -> String {
    "Preview".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let output = OutputConfig::default();
        assert_eq!(output.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(output.link_target, "_blank");
        assert_eq!(output.title, "Preview");
    }

    #[test]
    fn test_partial_toml() {
        let output: OutputConfig = toml::from_str(r#"LinkTarget = """#).unwrap();
        assert!(output.link_target.is_empty());
        assert_eq!(output.placeholder, DEFAULT_PLACEHOLDER);
    }
}
