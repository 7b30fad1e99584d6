//! Core enums for the rendering pipeline.

use serde::{Deserialize, Serialize};

/// Identifies one step of the markdown-to-HTML pipeline.
///
/// The variants are declared in the order the renderer applies them;
/// [`StageKind::ALL`] exposes that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    /// Escape `&`, `<` and `>`
    Escape,
    /// Triple-backtick code blocks
    FencedCode,
    /// `#`, `##` and `###` headings
    Headings,
    /// Bold, italic and strikethrough
    Emphasis,
    /// Single-backtick code spans
    InlineCode,
    /// `![alt](url)`
    Images,
    /// `[text](url)`
    Links,
    /// `> quoted` lines
    Blockquotes,
    /// `---`, `***` and `___`
    HorizontalRules,
    /// Bulleted and numbered items
    Lists,
    /// Pipe-delimited rows
    Tables,
    /// Blank-line separated paragraphs
    Paragraphs,
    /// Remove empty or misplaced paragraph tags
    Cleanup,
}

impl StageKind {
    /// Every stage, in pipeline order.
    pub const ALL: [StageKind; 13] = [
        StageKind::Escape,
        StageKind::FencedCode,
        StageKind::Headings,
        StageKind::Emphasis,
        StageKind::InlineCode,
        StageKind::Images,
        StageKind::Links,
        StageKind::Blockquotes,
        StageKind::HorizontalRules,
        StageKind::Lists,
        StageKind::Tables,
        StageKind::Paragraphs,
        StageKind::Cleanup,
    ];
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Escape => write!(f, "escape"),
            StageKind::FencedCode => write!(f, "fenced-code"),
            StageKind::Headings => write!(f, "headings"),
            StageKind::Emphasis => write!(f, "emphasis"),
            StageKind::InlineCode => write!(f, "inline-code"),
            StageKind::Images => write!(f, "images"),
            StageKind::Links => write!(f, "links"),
            StageKind::Blockquotes => write!(f, "blockquotes"),
            StageKind::HorizontalRules => write!(f, "horizontal-rules"),
            StageKind::Lists => write!(f, "lists"),
            StageKind::Tables => write!(f, "tables"),
            StageKind::Paragraphs => write!(f, "paragraphs"),
            StageKind::Cleanup => write!(f, "cleanup"),
        }
    }
}
