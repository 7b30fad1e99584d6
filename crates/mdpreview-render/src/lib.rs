//! mdpreview Render
//!
//! Converts a markdown document into an HTML fragment by running a fixed,
//! ordered list of text transformations over it.
//!
//! # Example
//!
//! ```
//! use mdpreview_render::render;
//!
//! let html = render("# Hello\n\nSome **bold** text");
//! assert_eq!(html, "<h1>Hello</h1>\n<p>Some <strong>bold</strong> text</p>");
//! ```
//!
//! The renderer is forgiving: unmatched markers are left as literal text
//! and every input, including the empty string, produces output.

pub mod block;
pub mod document;
pub mod features;
pub mod inline;
pub mod pipeline;
pub mod protect;

pub use document::standalone;
pub use features::RenderFeatures;
pub use inline::escape_html;
pub use pipeline::{stage, Stage, StageFn, PIPELINE};

use log::{debug, trace};
use mdpreview_core::StageKind;

/// Markdown to HTML renderer.
///
/// Holds only immutable options; every call to [`Renderer::render`] is
/// independent of the previous ones.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    features: RenderFeatures,
}

impl Renderer {
    /// Create a renderer with the default features.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with specific features.
    pub fn with_features(features: RenderFeatures) -> Self {
        Self { features }
    }

    /// The options this renderer was built with.
    pub fn features(&self) -> &RenderFeatures {
        &self.features
    }

    /// The fragment returned for an empty or whitespace-only document.
    pub fn empty_state(&self) -> String {
        format!(
            r#"<p class="empty-state">{}</p>"#,
            escape_html(&self.features.placeholder)
        )
    }

    /// Render a markdown document to an HTML fragment.
    pub fn render(&self, input: &str) -> String {
        self.render_through(input, StageKind::Cleanup)
    }

    /// Run the pipeline up to and including `last`.
    ///
    /// Useful for inspecting the intermediate text a stage sees.
    pub fn render_through(&self, input: &str, last: StageKind) -> String {
        if input.trim().is_empty() {
            trace!("Empty document, returning placeholder");
            return self.empty_state();
        }

        let mut html = normalize_newlines(input);
        for stage in PIPELINE.iter() {
            if stage.is_enabled(&self.features) {
                html = (stage.apply)(&html, &self.features);
                trace!("After {}: {} bytes", stage.kind, html.len());
            } else {
                trace!("Skipping disabled stage {}", stage.kind);
            }
            if stage.kind == last {
                break;
            }
        }

        debug!("Rendered {} bytes of markdown into {} bytes of HTML", input.len(), html.len());
        html
    }
}

/// Render with the default features.
pub fn render(input: &str) -> String {
    Renderer::new().render(input)
}

/// Convert CRLF and lone CR line endings to LF.
fn normalize_newlines(input: &str) -> String {
    if input.contains('\r') {
        input.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        input.to_string()
    }
}
