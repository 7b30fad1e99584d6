//! Rendering options.

use mdpreview_config::Config;

/// Options consulted by the pipeline stages.
///
/// Built from a [`Config`]; the renderer never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFeatures {
    /// Render `~~text~~` as `<del>`
    pub strikethrough: bool,
    /// Run the image stage
    pub images: bool,
    /// Run the link stage
    pub links: bool,
    /// Run the table stage
    pub tables: bool,
    /// Accept `+` as a list marker
    pub plus_bullets: bool,
    /// Keep the fence language as a `class` on `<code>`
    pub language_class: bool,
    /// Empty-state text (unescaped)
    pub placeholder: String,
    /// Link `target` attribute, empty for none
    pub link_target: String,
}

impl Default for RenderFeatures {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RenderFeatures {
    /// Create features from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let features = &config.features;
        let output = &config.output;
        Self {
            strikethrough: features.strikethrough,
            images: features.images,
            links: features.links,
            tables: features.tables,
            plus_bullets: features.plus_bullets,
            language_class: features.language_class,
            placeholder: output.placeholder.clone(),
            link_target: output.link_target.clone(),
        }
    }
}
