//! Inline stages: escaping, emphasis, code spans, images and links.

use crate::features::RenderFeatures;
use crate::protect::{map_unprotected, Protect, Shielded};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// =============================================================================
// Regex patterns
// =============================================================================

/// `***text***`
static BOLD_ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(\S(?:[^\n]*?\S)?)\*\*\*").unwrap());

/// `**text**`
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(\S(?:[^\n]*?\S)?)\*\*").unwrap());

/// `__text__`, not inside a word
static BOLD_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b__(\S(?:[^\n]*?\S)?)__\b").unwrap());

/// `*text*`; the delimiters must hug the text so list markers survive
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^\s*](?:[^*\n]*[^\s*])?)\*").unwrap());

/// `_text_`, not inside a word such as `snake_case_name`
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_([^\s_](?:[^_\n]*[^\s_])?)_\b").unwrap());

/// `~~text~~`
static STRIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^\s~](?:[^~\n]*[^\s~])?)~~").unwrap());

/// `` `code` ``
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// `![alt](url)`
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^)\s]+)\)").unwrap());

/// `[text](url)`, with an optional leading `!` captured so images can be skipped
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]\n]+)\]\(([^)\s]+)\)").unwrap());

/// Any tag produced by an earlier stage
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

// =============================================================================
// Helpers
// =============================================================================

/// Escape `&`, `<` and `>`.
///
/// `&` goes first so the entities produced for `<` and `>` stay intact.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Make already-escaped text safe inside a double-quoted attribute.
pub(crate) fn quote_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

// =============================================================================
// Stages
// =============================================================================

/// Escape the whole document before any markup is generated.
pub fn escape(text: &str, _features: &RenderFeatures) -> String {
    escape_html(text)
}

/// Bold, italic and strikethrough.
///
/// Double delimiters are replaced before single ones so that `**bold**`
/// never reads as nested italics. Raw backtick spans, code blocks and
/// link destinations are left alone, though a delimiter pair may enclose
/// them.
pub fn emphasis(text: &str, features: &RenderFeatures) -> String {
    map_unprotected(text, Protect::CodeAndUrls, |segment| {
        let out = BOLD_ITALIC_RE.replace_all(segment, "<strong><em>${1}</em></strong>");
        let out = BOLD_RE.replace_all(&out, "<strong>${1}</strong>");
        let out = BOLD_UNDERSCORE_RE.replace_all(&out, "<strong>${1}</strong>");
        let out = ITALIC_RE.replace_all(&out, "<em>${1}</em>");
        let out = ITALIC_UNDERSCORE_RE.replace_all(&out, "<em>${1}</em>");
        if features.strikethrough {
            STRIKE_RE.replace_all(&out, "<del>${1}</del>").into_owned()
        } else {
            out.into_owned()
        }
    })
}

/// `` `code` `` to `<code>`.
pub fn inline_code(text: &str, _features: &RenderFeatures) -> String {
    map_unprotected(text, Protect::Blocks, |segment| {
        INLINE_CODE_RE
            .replace_all(segment, "<code>${1}</code>")
            .into_owned()
    })
}

/// `![alt](url)` to `<img>`. Runs before [`links`].
///
/// Tags inside the alt text, including code spans, are stripped.
pub fn images(text: &str, _features: &RenderFeatures) -> String {
    let shielded = Shielded::new(text, Protect::Code);
    let out = IMAGE_RE.replace_all(shielded.as_str(), |caps: &Captures| {
        let alt = shielded.restore(&caps[1]);
        let alt = TAG_RE.replace_all(&alt, "");
        let src = shielded.restore(&caps[2]);
        let src = TAG_RE.replace_all(&src, "");
        format!(
            r#"<img src="{}" alt="{}" />"#,
            quote_attr(&src),
            quote_attr(&alt)
        )
    });
    shielded.restore(&out)
}

/// `[text](url)` to `<a>`.
///
/// Code spans and tags from earlier stages are opaque here: link text may
/// contain them, but a link is never built inside one. A match preceded by
/// `!` is image syntax the image stage did not accept and is copied
/// through untouched.
pub fn links(text: &str, features: &RenderFeatures) -> String {
    let target = if features.link_target.is_empty() {
        String::new()
    } else {
        format!(r#" target="{}""#, quote_attr(&escape_html(&features.link_target)))
    };

    let shielded = Shielded::new(text, Protect::Markup);
    let out = LINK_RE.replace_all(shielded.as_str(), |caps: &Captures| {
        if &caps[1] == "!" {
            return caps[0].to_string();
        }
        let href = shielded.restore(&caps[3]);
        let href = TAG_RE.replace_all(&href, "");
        format!(r#"<a href="{}"{}>{}</a>"#, quote_attr(&href), target, &caps[2])
    });
    shielded.restore(&out)
}
