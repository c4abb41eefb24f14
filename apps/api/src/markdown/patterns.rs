//! Pre-compiled regex patterns for the constrained-markdown passes.
//!
//! Compiled once on first use via `LazyLock`. The literals are fixed and known to be
//! valid, so construction cannot fail at runtime.

use std::sync::LazyLock;

use regex::Regex;

/// Fenced-code delimiters, optionally tagged `markdown` or `md`.
pub static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:markdown|md)?").expect("valid code fence pattern"));

/// HTML-like tags: `<` followed by at least one non-`>` character and a closing `>`.
pub static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid html tag pattern"));

/// Emoji shortcodes such as `:rocket:`. Callers must reject matches followed by `(`.
pub static SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\w+:").expect("valid shortcode pattern"));

/// Runs of two or more spaces.
pub static MULTI_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid space pattern"));

/// Runs of three or more newlines.
pub static MULTI_NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline pattern"));

/// Inline markers, scanned left to right in a single alternation:
/// group 1 = bold body, groups 2/3 = link label/target.
pub static INLINE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*|\[(.*?)\]\((.*?)\)").expect("valid inline marker pattern")
});

/// A markdown link whose target starts with `http`.
pub static HTTP_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]\(http").expect("valid http link pattern"));

/// An email address rendered as a `mailto:` link.
pub static MAILTO_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?@.*?\]\(mailto:").expect("valid mailto pattern"));

/// Characters dropped from a title when deriving a filename.
pub static FILENAME_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid filename strip pattern"));

/// Whitespace/hyphen runs replaced by `_` in derived filenames.
pub static FILENAME_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid filename separator pattern"));
