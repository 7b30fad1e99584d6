//! The ordered stage list.
//!
//! Order matters: code is fenced before anything can rewrite it, bold
//! runs before italic, inline code before links, and images before links
//! because `[text](url)` is a substring of `![alt](url)`.

use crate::block;
use crate::features::RenderFeatures;
use crate::inline;
use mdpreview_core::StageKind;

/// Signature shared by every stage.
pub type StageFn = fn(&str, &RenderFeatures) -> String;

/// One named transformation of the document.
#[derive(Clone, Copy)]
pub struct Stage {
    /// Which step this is
    pub kind: StageKind,
    /// The transformation itself
    pub apply: StageFn,
}

impl Stage {
    /// Whether the stage runs under the given features.
    pub fn is_enabled(&self, features: &RenderFeatures) -> bool {
        match self.kind {
            StageKind::Images => features.images,
            StageKind::Links => features.links,
            StageKind::Tables => features.tables,
            _ => true,
        }
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage").field("kind", &self.kind).finish()
    }
}

/// Every stage, in the order the renderer applies them.
pub static PIPELINE: [Stage; 13] = [
    Stage { kind: StageKind::Escape, apply: inline::escape },
    Stage { kind: StageKind::FencedCode, apply: block::fenced_code },
    Stage { kind: StageKind::Headings, apply: block::headings },
    Stage { kind: StageKind::Emphasis, apply: inline::emphasis },
    Stage { kind: StageKind::InlineCode, apply: inline::inline_code },
    Stage { kind: StageKind::Images, apply: inline::images },
    Stage { kind: StageKind::Links, apply: inline::links },
    Stage { kind: StageKind::Blockquotes, apply: block::blockquotes },
    Stage { kind: StageKind::HorizontalRules, apply: block::horizontal_rules },
    Stage { kind: StageKind::Lists, apply: block::lists },
    Stage { kind: StageKind::Tables, apply: block::tables },
    Stage { kind: StageKind::Paragraphs, apply: block::paragraphs },
    Stage { kind: StageKind::Cleanup, apply: block::cleanup },
];

/// Look up the stage for `kind`.
///
/// `PIPELINE` is laid out in `StageKind` declaration order.
pub fn stage(kind: StageKind) -> &'static Stage {
    &PIPELINE[kind as usize]
}
