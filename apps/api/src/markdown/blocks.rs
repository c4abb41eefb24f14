//! Block classification: one pass over a normalized document that both emitters share.

use crate::markdown::inline::{plain_text, tokenize, InlineSpan};
use crate::markdown::patterns::{FILENAME_SEPARATOR_RE, FILENAME_STRIP_RE};

/// Used when no usable Title is found.
pub const DEFAULT_FILENAME: &str = "resume";

/// A renderable unit of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(Vec<InlineSpan>),
    /// Section headings render without inline styling.
    Heading(String),
    Bullet(Vec<InlineSpan>),
    Paragraph(Vec<InlineSpan>),
    Blank,
}

/// Classifies a single line. Prefixes are matched after stripping surrounding whitespace.
pub fn classify_line(line: &str) -> Block {
    let line = line.trim();

    if line.is_empty() {
        Block::Blank
    } else if let Some(body) = line.strip_prefix("# ") {
        Block::Title(tokenize(body))
    } else if let Some(body) = line.strip_prefix("## ") {
        Block::Heading(plain_text(&tokenize(body)))
    } else if let Some(body) = line.strip_prefix("- ") {
        Block::Bullet(tokenize(body))
    } else {
        Block::Paragraph(tokenize(line))
    }
}

/// One block per input line, in input order.
pub fn parse_blocks(document: &str) -> Vec<Block> {
    document.lines().map(classify_line).collect()
}

/// Derives a download filename (without extension) from the first Title line.
pub fn filename_base(document: &str) -> String {
    let title = parse_blocks(document).into_iter().find_map(|block| match block {
        Block::Title(spans) => Some(plain_text(&spans)),
        _ => None,
    });

    let Some(title) = title else {
        return DEFAULT_FILENAME.to_string();
    };

    let stripped = FILENAME_STRIP_RE.replace_all(title.trim(), "");
    let joined = FILENAME_SEPARATOR_RE.replace_all(&stripped, "_");
    let base = joined.trim_matches('_');

    if base.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        base.to_string()
    }
}
