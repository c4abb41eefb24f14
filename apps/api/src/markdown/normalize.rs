//! Markdown normalizer: reshapes raw model output into the constrained dialect.
//!
//! Two stages:
//! 1. `clean`: strip fences, tags, shortcodes and non-ASCII, collapse whitespace.
//!    Applied until the text stops changing, since one step can expose a match for
//!    an earlier one (e.g. removing an emoji between `:x` and `:`).
//! 2. `reflow`: strip every line, drop leading blanks, force a single blank line
//!    before each `##` heading and collapse blank runs to one.
//!
//! Finally the content-line cap is applied according to `NormalizeOptions`.
//! `normalize(normalize(x)) == normalize(x)` for every input.

use tracing::warn;

use crate::markdown::patterns::{
    CODE_FENCE_RE, HTML_TAG_RE, MULTI_NEWLINE_RE, MULTI_SPACE_RE, SHORTCODE_RE,
};

/// What to do when a normalized resume has more content lines than the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCapPolicy {
    /// Keep everything and log a warning.
    Warn,
    /// Keep only the first `max_total_lines` lines (blank lines included).
    Truncate { max_total_lines: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Non-blank line count above which `policy` kicks in.
    pub max_content_lines: usize,
    pub policy: LineCapPolicy,
}

impl Default for NormalizeOptions {
    /// Warn-only above 40 content lines.
    fn default() -> Self {
        Self {
            max_content_lines: 40,
            policy: LineCapPolicy::Warn,
        }
    }
}

impl NormalizeOptions {
    /// Hard cap: above 35 content lines keep the first 45 lines.
    pub fn truncating() -> Self {
        Self {
            max_content_lines: 35,
            policy: LineCapPolicy::Truncate {
                max_total_lines: 45,
            },
        }
    }
}

/// Normalizes with the default (warn-only) options.
pub fn normalize(raw: &str) -> String {
    normalize_with(raw, &NormalizeOptions::default())
}

pub fn normalize_with(raw: &str, options: &NormalizeOptions) -> String {
    let mut cleaned = clean(raw);
    loop {
        let next = clean(&cleaned);
        if next == cleaned {
            break;
        }
        cleaned = next;
    }

    apply_line_cap(reflow(&cleaned), options)
}

/// Number of lines with non-whitespace content.
pub fn count_content_lines(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

/// One pass of the character-level cleanup pipeline, in its fixed order.
fn clean(raw: &str) -> String {
    let text = CODE_FENCE_RE.replace_all(raw, "");
    let text = HTML_TAG_RE.replace_all(&text, "");
    let text = strip_shortcodes(&text);

    // Supplementary planes (emoji, pictographs), then anything else outside ASCII.
    let text: String = text
        .chars()
        .filter(|&c| (c as u32) < 0x10000)
        .filter(|&c| (c as u32) < 0x7F || c == '\n' || c == '\t')
        .collect();

    let text = MULTI_SPACE_RE.replace_all(&text, " ");
    let text = MULTI_NEWLINE_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Removes `:word:` shortcodes unless immediately followed by `(`, which would make
/// them part of link syntax.
fn strip_shortcodes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied_to = 0;
    let mut search_from = 0;

    while let Some(m) = SHORTCODE_RE.find_at(text, search_from) {
        if text[m.end()..].starts_with('(') {
            // Retry from the closing colon, it may open another shortcode.
            search_from = m.end() - 1;
            continue;
        }
        out.push_str(&text[copied_to..m.start()]);
        copied_to = m.end();
        search_from = m.end();
    }

    out.push_str(&text[copied_to..]);
    out
}

/// Line-level structural pass.
fn reflow(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let line = line.trim();
        let prev_blank = lines.last().map(|prev| prev.is_empty());

        if line.is_empty() {
            // Leading blanks are dropped, runs collapse to one.
            if prev_blank.unwrap_or(true) {
                continue;
            }
        } else if line.starts_with("##") && prev_blank == Some(false) {
            lines.push("");
        }

        lines.push(line);
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn apply_line_cap(text: String, options: &NormalizeOptions) -> String {
    let content_lines = count_content_lines(&text);
    if content_lines <= options.max_content_lines {
        return text;
    }

    match options.policy {
        LineCapPolicy::Warn => {
            warn!(
                "Resume has {} content lines (recommended at most {})",
                content_lines, options.max_content_lines
            );
            text
        }
        LineCapPolicy::Truncate { max_total_lines } => {
            warn!(
                "Resume has {} content lines, truncating to {} lines",
                content_lines, max_total_lines
            );
            let mut kept: Vec<&str> = text.split('\n').take(max_total_lines).collect();
            while kept.last().is_some_and(|line| line.is_empty()) {
                kept.pop();
            }
            kept.join("\n")
        }
    }
}
