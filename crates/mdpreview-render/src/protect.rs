//! Code protection for the substitution stages.
//!
//! Later stages run their regexes over the cumulative output, so they must
//! step around markup that an earlier stage produced verbatim. [`Shielded`]
//! swaps every protected span for a short placeholder token, lets a stage
//! rewrite the whole text, and then puts the spans back. A delimiter pair
//! may therefore enclose protected spans without the span being touched.

use regex::{Captures, Regex};
use std::sync::LazyLock;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// Rendered fenced code blocks.
const CODE_BLOCK: &str = r"(?s:<pre><code[^>]*>.*?</code></pre>)";
/// Rendered code spans.
const CODE_SPAN: &str = r"<code>[^\n]*?</code>";
/// Raw backtick spans, before the inline code stage runs.
const RAW_CODE: &str = r"`[^`\n]+`";
/// Link and image destinations.
const DESTINATION: &str = r"\]\([^)\s]+\)";
/// Any single tag. User text is escaped, so every `<` is generated markup.
const TAG: &str = r"<[^>\n]*>";
/// Sentinel characters already present in the input.
const SENTINEL: &str = r"[\x{E000}\x{E001}]";

static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&[CODE_BLOCK, SENTINEL].join("|")).unwrap());

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&[CODE_BLOCK, CODE_SPAN, RAW_CODE, SENTINEL].join("|")).unwrap());

static CODE_AND_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&[CODE_BLOCK, CODE_SPAN, RAW_CODE, DESTINATION, SENTINEL].join("|")).unwrap()
});

static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&[CODE_BLOCK, CODE_SPAN, TAG, SENTINEL].join("|")).unwrap());

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap());

/// Which spans a transform must not touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protect {
    /// `<pre><code>` blocks only
    Blocks,
    /// Blocks and inline code, rendered or raw
    Code,
    /// Blocks, inline code and `](url)` destinations
    CodeAndUrls,
    /// Blocks, code spans and every other generated tag
    Markup,
}

impl Protect {
    fn regex(self) -> &'static Regex {
        match self {
            Protect::Blocks => &*BLOCK_RE,
            Protect::Code => &*CODE_RE,
            Protect::CodeAndUrls => &*CODE_AND_URL_RE,
            Protect::Markup => &*MARKUP_RE,
        }
    }
}

/// Text with its protected spans replaced by placeholder tokens.
///
/// Tokens contain no newline, whitespace, markdown delimiter or `<`, so
/// stage regexes treat them as opaque word-like runs.
#[derive(Debug, Clone)]
pub struct Shielded<'a> {
    text: String,
    spans: Vec<&'a str>,
}

impl<'a> Shielded<'a> {
    /// Replace every span `protect` covers with a token.
    pub fn new(text: &'a str, protect: Protect) -> Self {
        let mut shielded = String::with_capacity(text.len());
        let mut spans = Vec::new();
        let mut last = 0;

        for m in protect.regex().find_iter(text) {
            shielded.push_str(&text[last..m.start()]);
            shielded.push(OPEN);
            shielded.push_str(&spans.len().to_string());
            shielded.push(CLOSE);
            spans.push(m.as_str());
            last = m.end();
        }
        shielded.push_str(&text[last..]);

        Self {
            text: shielded,
            spans,
        }
    }

    /// The tokenised text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Put the protected spans back into `text`.
    pub fn restore(&self, text: &str) -> String {
        if self.spans.is_empty() {
            return text.to_string();
        }
        TOKEN_RE
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.spans.get(index))
                    .map_or_else(|| caps[0].to_string(), |span| span.to_string())
            })
            .into_owned()
    }
}

/// A slice of the document, either open to transformation or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text a stage may rewrite
    Text(&'a str),
    /// Text that must be copied through unchanged
    Protected(&'a str),
}

/// Split `text` into alternating text and protected segments.
///
/// Empty text segments are omitted.
pub fn segments(text: &str, protect: Protect) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;

    for m in protect.regex().find_iter(text) {
        if m.start() > last {
            out.push(Segment::Text(&text[last..m.start()]));
        }
        out.push(Segment::Protected(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        out.push(Segment::Text(&text[last..]));
    }

    out
}

/// Apply `f` to the whole text with protected spans tokenised, then
/// restore them.
pub fn map_unprotected<F>(text: &str, protect: Protect, f: F) -> String
where
    F: Fn(&str) -> String,
{
    let shielded = Shielded::new(text, protect);
    shielded.restore(&f(shielded.as_str()))
}
