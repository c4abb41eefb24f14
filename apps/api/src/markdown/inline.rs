//! Inline-span tokenizer for the constrained markdown dialect.
//!
//! Recognizes `**bold**` and `[label](target)`; everything else is plain text.
//! Malformed markers (an unclosed `**` or `[`) are never an error and pass through
//! as literal characters.

use crate::markdown::patterns::INLINE_MARKER_RE;

/// A maximal run of a line body carrying a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Plain(String),
    Bold(String),
    /// Only the label is ever rendered; the target is carried for callers that want it.
    Link { label: String, target: String },
}

impl InlineSpan {
    /// The visible text of the span (the label for links).
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Plain(text) | InlineSpan::Bold(text) => text,
            InlineSpan::Link { label, .. } => label,
        }
    }
}

/// Splits a single line body into styled spans, left to right.
///
/// Trailing `\r`/`\n` are not part of the body. Zero-length regions are omitted, so an
/// empty body yields no spans and a body without markers yields one `Plain` span.
pub fn tokenize(line: &str) -> Vec<InlineSpan> {
    let body = line.trim_end_matches(['\r', '\n']);
    let mut spans = Vec::new();
    let mut last_end = 0;

    for caps in INLINE_MARKER_RE.captures_iter(body) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_plain(&mut spans, &body[last_end..whole.start()]);

        if let Some(bold) = caps.get(1) {
            if !bold.as_str().is_empty() {
                spans.push(InlineSpan::Bold(bold.as_str().to_string()));
            }
        } else if let (Some(label), Some(target)) = (caps.get(2), caps.get(3)) {
            if !label.as_str().is_empty() {
                spans.push(InlineSpan::Link {
                    label: label.as_str().to_string(),
                    target: target.as_str().to_string(),
                });
            }
        }

        last_end = whole.end();
    }

    push_plain(&mut spans, &body[last_end..]);
    spans
}

/// Concatenates the visible text of `spans`, dropping all styling.
pub fn plain_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

/// Appends plain text, extending a preceding `Plain` span so plain runs stay maximal.
fn push_plain(spans: &mut Vec<InlineSpan>, text: &str) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(InlineSpan::Plain(prev)) => prev.push_str(text),
        _ => spans.push(InlineSpan::Plain(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plain(s: &str) -> InlineSpan {
        InlineSpan::Plain(s.to_string())
    }

    fn bold(s: &str) -> InlineSpan {
        InlineSpan::Bold(s.to_string())
    }

    fn link(label: &str, target: &str) -> InlineSpan {
        InlineSpan::Link {
            label: label.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn test_mixed_line_with_trailing_newline() {
        let spans = tokenize("Hello **World** [link](http://x.com)\n");
        assert_eq!(
            spans,
            vec![
                plain("Hello "),
                bold("World"),
                plain(" "),
                link("link", "http://x.com"),
            ]
        );
    }

    #[test]
    fn test_bullet_body() {
        let spans = tokenize("Built **X** using [Y](http://z)");
        assert_eq!(
            spans,
            vec![plain("Built "), bold("X"), plain(" using "), link("Y", "http://z")]
        );
    }

    #[test]
    fn test_no_markers_is_single_plain_span() {
        assert_eq!(tokenize("Rust, Go, SQL"), vec![plain("Rust, Go, SQL")]);
    }

    #[test]
    fn test_empty_body_has_no_spans() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\r\n").is_empty());
    }

    #[test]
    fn test_unclosed_bold_passes_through() {
        assert_eq!(tokenize("a **b c"), vec![plain("a **b c")]);
    }

    #[test]
    fn test_unclosed_link_passes_through() {
        assert_eq!(tokenize("see [docs(here"), vec![plain("see [docs(here")]);
        assert_eq!(tokenize("see [docs](here"), vec![plain("see [docs](here")]);
    }

    #[test]
    fn test_empty_bold_emits_nothing() {
        assert_eq!(tokenize("a****b"), vec![plain("ab")]);
    }

    #[test]
    fn test_empty_link_label_emits_nothing() {
        assert!(tokenize("[](http://x)").is_empty());
        assert_eq!(tokenize("a [](http://x) b"), vec![plain("a  b")]);
    }

    #[test]
    fn test_adjacent_markers() {
        assert_eq!(
            tokenize("**A**[b](c)**D**"),
            vec![bold("A"), link("b", "c"), bold("D")]
        );
    }

    #[test]
    fn test_contact_line() {
        let spans = tokenize("[jane@x.io](mailto:jane@x.io) | **Remote**");
        assert_eq!(
            spans,
            vec![
                link("jane@x.io", "mailto:jane@x.io"),
                plain(" | "),
                bold("Remote"),
            ]
        );
        assert_eq!(plain_text(&spans), "jane@x.io | Remote");
    }

    #[derive(Debug, Clone)]
    enum Segment {
        Plain(String),
        Bold(String),
        Link(String, String),
    }

    fn segment() -> impl Strategy<Value = Segment> {
        prop_oneof![
            "[a-zA-Z0-9 ,.:|@-]{1,12}".prop_map(Segment::Plain),
            "[a-zA-Z0-9 ,.-]{1,12}".prop_map(Segment::Bold),
            ("[a-zA-Z0-9 .@-]{1,12}", "[a-z0-9:/.@-]{0,16}")
                .prop_map(|(label, target)| Segment::Link(label, target)),
        ]
    }

    proptest! {
        #[test]
        fn prop_spans_reconstruct_visible_text(segments in prop::collection::vec(segment(), 0..8)) {
            let mut line = String::new();
            let mut expected = String::new();
            for seg in &segments {
                match seg {
                    Segment::Plain(t) => {
                        line.push_str(t);
                        expected.push_str(t);
                    }
                    Segment::Bold(t) => {
                        line.push_str(&format!("**{t}**"));
                        expected.push_str(t);
                    }
                    Segment::Link(label, target) => {
                        line.push_str(&format!("[{label}]({target})"));
                        expected.push_str(label);
                    }
                }
            }

            let spans = tokenize(&line);
            prop_assert_eq!(plain_text(&spans), expected);
            prop_assert!(spans.iter().all(|s| !s.text().is_empty()));
        }

        #[test]
        fn prop_marker_free_text_is_one_plain_span(text in "[^*\\[\\]\r\n]{1,40}") {
            prop_assert_eq!(tokenize(&text), vec![InlineSpan::Plain(text.clone())]);
        }
    }
}
