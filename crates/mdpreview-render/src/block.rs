//! Block stages: code fences, headings, quotes, rules, lists, tables and
//! paragraphs.
//!
//! Every stage after [`fenced_code`] works around the `<pre><code>` blocks
//! it produced, so fenced content is never reinterpreted.

use crate::features::RenderFeatures;
use crate::inline::quote_attr;
use crate::protect::{map_unprotected, segments, Protect, Segment};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// =============================================================================
// Regex patterns
// =============================================================================

/// Fenced code: ```` ```lang\n ... ``` ````, opening at the start of a line
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)^```([^\s`]*)[ \t]*\n(.*?)```").unwrap());

static H3_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.*?)[ \t]*$").unwrap());
static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*?)[ \t]*$").unwrap());
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*?)[ \t]*$").unwrap());

/// `> text`, seen after escaping as `&gt; text`
static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^&gt; (.+)$").unwrap());

static HR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:---|\*\*\*|___)$").unwrap());

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:[*-]|\d+\.) (.+)$").unwrap());

static LIST_ITEM_PLUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:[*+-]|\d+\.) (.+)$").unwrap());

/// A paragraph that already starts with block markup
static BLOCK_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*<(?:h[1-6]|ul|ol|li|blockquote|pre|hr|table|tr|p)\b").unwrap()
});

/// One rendered paragraph
static PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<p>(.*?)</p>").unwrap());

static NESTED_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(?:h[1-6]|ul|ol|blockquote|pre|table)\b").unwrap());

static NESTED_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</(?:h[1-6]|ul|ol|blockquote|pre|table)>$").unwrap());

// =============================================================================
// Helpers
// =============================================================================

/// Rewrite contiguous runs of lines accepted by `classify` into one line
/// wrapped in `open`/`close`. Other lines pass through unchanged.
fn wrap_runs<F>(text: &str, open: &str, close: &str, classify: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut lines: Vec<String> = Vec::new();
    let mut run: Option<String> = None;

    for line in text.split('\n') {
        match classify(line) {
            Some(item) => run.get_or_insert_with(|| open.to_string()).push_str(&item),
            None => {
                if let Some(mut finished) = run.take() {
                    finished.push_str(close);
                    lines.push(finished);
                }
                lines.push(line.to_string());
            }
        }
    }
    if let Some(mut finished) = run.take() {
        finished.push_str(close);
        lines.push(finished);
    }

    lines.join("\n")
}

/// Cells of a `| a | b |` row, or `None` if the line is not a row.
fn table_cells(line: &str) -> Option<Vec<&str>> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix('|')?;
    if !rest.contains('|') {
        return None;
    }

    let mut cells: Vec<&str> = rest.split('|').map(str::trim).collect();
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    Some(cells)
}

// =============================================================================
// Stages
// =============================================================================

/// Fenced code blocks become `<pre><code>` with the trimmed body.
///
/// The language tag is dropped unless `language_class` is enabled.
pub fn fenced_code(text: &str, features: &RenderFeatures) -> String {
    FENCE_RE
        .replace_all(text, |caps: &Captures| {
            let lang = &caps[1];
            let code = caps[2].trim();
            if features.language_class && !lang.is_empty() {
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    quote_attr(lang),
                    code
                )
            } else {
                format!("<pre><code>{}</code></pre>", code)
            }
        })
        .into_owned()
}

/// `#`, `##` and `###` headings, longest marker first.
pub fn headings(text: &str, _features: &RenderFeatures) -> String {
    map_unprotected(text, Protect::Blocks, |segment| {
        let out = H3_RE.replace_all(segment, "<h3>${1}</h3>");
        let out = H2_RE.replace_all(&out, "<h2>${1}</h2>");
        H1_RE.replace_all(&out, "<h1>${1}</h1>").into_owned()
    })
}

/// Each `> ` line becomes its own `<blockquote>`.
pub fn blockquotes(text: &str, _features: &RenderFeatures) -> String {
    map_unprotected(text, Protect::Blocks, |segment| {
        QUOTE_RE
            .replace_all(segment, "<blockquote>${1}</blockquote>")
            .into_owned()
    })
}

/// Lines of exactly `---`, `***` or `___`.
pub fn horizontal_rules(text: &str, _features: &RenderFeatures) -> String {
    map_unprotected(text, Protect::Blocks, |segment| {
        HR_RE.replace_all(segment, "<hr>").into_owned()
    })
}

/// List items, then one `<ul>` around each contiguous run of items.
///
/// Numbered items are wrapped in `<ul>` as well.
pub fn lists(text: &str, features: &RenderFeatures) -> String {
    let item_re: &Regex = if features.plus_bullets {
        &*LIST_ITEM_PLUS_RE
    } else {
        &*LIST_ITEM_RE
    };

    map_unprotected(text, Protect::Blocks, |segment| {
        let items = item_re.replace_all(segment, "<li>${1}</li>");
        wrap_runs(&items, "<ul>", "</ul>", |line| {
            (line.starts_with("<li>") && line.ends_with("</li>")).then(|| line.to_string())
        })
    })
}

/// Pipe-delimited rows become `<tr>`; contiguous rows share a `<table>`.
///
/// A `|` inside a code span or a generated tag does not split cells.
pub fn tables(text: &str, _features: &RenderFeatures) -> String {
    map_unprotected(text, Protect::Markup, |segment| {
        wrap_runs(segment, "<table>", "</table>", |line| {
            let cells = table_cells(line)?;
            let mut row = String::from("<tr>");
            for cell in cells {
                row.push_str("<td>");
                row.push_str(cell);
                row.push_str("</td>");
            }
            row.push_str("</tr>");
            Some(row)
        })
    })
}

/// Wrap blank-line separated blocks in `<p>` with `<br>` for single
/// newlines. Blocks that already start with block markup are kept as is.
/// Code blocks are atomic: their blank lines and newlines are preserved.
pub fn paragraphs(text: &str, _features: &RenderFeatures) -> String {
    let mut lines: Vec<String> = vec![String::new()];

    for segment in segments(text, Protect::Blocks) {
        match segment {
            Segment::Protected(code) => {
                if let Some(current) = lines.last_mut() {
                    current.push_str(code);
                }
            }
            Segment::Text(t) => {
                let mut parts = t.split('\n');
                if let (Some(first), Some(current)) = (parts.next(), lines.last_mut()) {
                    current.push_str(first);
                }
                lines.extend(parts.map(str::to_string));
            }
        }
    }

    lines
        .split(|line| line.trim().is_empty())
        .filter(|block| !block.is_empty())
        .map(|block| {
            if BLOCK_START_RE.is_match(&block[0]) {
                block.join("\n")
            } else {
                format!("<p>{}</p>", block.join("<br>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop empty paragraphs and unwrap paragraphs that only hold a block
/// element.
pub fn cleanup(text: &str, _features: &RenderFeatures) -> String {
    PARAGRAPH_RE
        .replace_all(text, |caps: &Captures| {
            let inner = &caps[1];
            if inner.trim().is_empty() {
                String::new()
            } else if inner == "<hr>"
                || (NESTED_OPEN_RE.is_match(inner) && NESTED_CLOSE_RE.is_match(inner))
            {
                inner.to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> RenderFeatures {
        RenderFeatures::default()
    }

    #[test]
    fn test_fenced_code() {
        assert_eq!(
            fenced_code("```\nx**y\n```", &features()),
            "<pre><code>x**y</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_language_dropped() {
        assert_eq!(
            fenced_code("```rust\nfn main() {}\n```", &features()),
            "<pre><code>fn main() {}</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_language_class() {
        let mut f = features();
        f.language_class = true;
        assert_eq!(
            fenced_code("```rust\nlet x = 1;\n```", &f),
            r#"<pre><code class="language-rust">let x = 1;</code></pre>"#
        );
    }

    #[test]
    fn test_fenced_code_non_greedy() {
        let out = fenced_code("```\na\n```\ntext\n```\nb\n```", &features());
        assert_eq!(out, "<pre><code>a</code></pre>\ntext\n<pre><code>b</code></pre>");
    }

    #[test]
    fn test_unclosed_fence_left_literal() {
        assert_eq!(fenced_code("```\nnever closed", &features()), "```\nnever closed");
    }

    #[test]
    fn test_fence_must_open_a_line() {
        let text = "- item ```\ncode\n```";
        assert_eq!(fenced_code(text, &features()), text);

        let out = fenced_code("- item\n```\ncode\n```", &features());
        assert_eq!(out, "- item\n<pre><code>code</code></pre>");
    }

    #[test]
    fn test_headings() {
        let out = headings("# One\n## Two\n### Three\n#### Four", &features());
        assert_eq!(out, "<h1>One</h1>\n<h2>Two</h2>\n<h3>Three</h3>\n#### Four");
    }

    #[test]
    fn test_heading_needs_space() {
        assert_eq!(headings("#tag", &features()), "#tag");
    }

    #[test]
    fn test_heading_inside_code_block() {
        let text = "<pre><code># comment</code></pre>";
        assert_eq!(headings(text, &features()), text);
    }

    #[test]
    fn test_blockquotes_per_line() {
        let out = blockquotes("&gt; one\n&gt; two", &features());
        assert_eq!(out, "<blockquote>one</blockquote>\n<blockquote>two</blockquote>");
    }

    #[test]
    fn test_horizontal_rules() {
        let out = horizontal_rules("---\n***\n___\n----", &features());
        assert_eq!(out, "<hr>\n<hr>\n<hr>\n----");
    }

    #[test]
    fn test_lists_single_wrapper() {
        assert_eq!(
            lists("- one\n- two", &features()),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_ordered_items_share_ul() {
        assert_eq!(
            lists("1. one\n2. two", &features()),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_lists_separate_runs() {
        let out = lists("* a\ntext\n+ b", &features());
        assert_eq!(out, "<ul><li>a</li></ul>\ntext\n<ul><li>b</li></ul>");
    }

    #[test]
    fn test_plus_bullets_toggle() {
        let mut f = features();
        f.plus_bullets = false;
        assert_eq!(lists("+ b", &f), "+ b");
    }

    #[test]
    fn test_table_cells() {
        assert_eq!(table_cells("| a | b |"), Some(vec!["a", "b"]));
        assert_eq!(table_cells("|a|b"), Some(vec!["a", "b"]));
        assert_eq!(table_cells("| a |  | c |"), Some(vec!["a", "", "c"]));
        assert_eq!(table_cells("a | b"), None);
        assert_eq!(table_cells("|only"), None);
    }

    #[test]
    fn test_tables() {
        let out = tables("| a | b |\n|---|---|\n| 1 | 2 |", &features());
        assert_eq!(
            out,
            "<table><tr><td>a</td><td>b</td></tr><tr><td>---</td><td>---</td></tr>\
             <tr><td>1</td><td>2</td></tr></table>"
        );
    }

    #[test]
    fn test_table_pipe_inside_code() {
        let out = tables("| <code>a|b</code> | c |", &features());
        assert_eq!(
            out,
            "<table><tr><td><code>a|b</code></td><td>c</td></tr></table>"
        );
    }

    #[test]
    fn test_paragraphs() {
        let out = paragraphs("one\ntwo\n\nthree", &features());
        assert_eq!(out, "<p>one<br>two</p>\n<p>three</p>");
    }

    #[test]
    fn test_paragraphs_keep_block_markup() {
        let out = paragraphs("<h1>T</h1>\n\n<ul><li>a</li></ul>", &features());
        assert_eq!(out, "<h1>T</h1>\n<ul><li>a</li></ul>");
    }

    #[test]
    fn test_paragraphs_code_block_atomic() {
        let out = paragraphs("<pre><code>a\n\nb</code></pre>", &features());
        assert_eq!(out, "<pre><code>a\n\nb</code></pre>");

        let out = paragraphs("see\n<pre><code>a\nb</code></pre>", &features());
        assert_eq!(out, "<p>see<br><pre><code>a\nb</code></pre></p>");
    }

    #[test]
    fn test_paragraphs_collapse_blank_runs() {
        let out = paragraphs("a\n\n\n  \nb\n", &features());
        assert_eq!(out, "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_cleanup() {
        assert_eq!(cleanup("<p></p><p> </p>x", &features()), "x");
        assert_eq!(cleanup("<p><h2>T</h2></p>", &features()), "<h2>T</h2>");
        assert_eq!(cleanup("<p><hr></p>", &features()), "<hr>");
        assert_eq!(
            cleanup("<p><ul><li>a</li></ul></p>", &features()),
            "<ul><li>a</li></ul>"
        );
        assert_eq!(cleanup("<p>text</p>", &features()), "<p>text</p>");
    }
}
