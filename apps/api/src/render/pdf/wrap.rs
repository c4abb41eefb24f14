//! Greedy word wrap over styled runs.
//!
//! Whitespace separates words and collapses to a single space; a word may span
//! several runs (e.g. `**X**,`). Words wider than the line are split by character.

use crate::markdown::InlineSpan;
use crate::render::pdf::metrics::{drawable, get_metrics, Face};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStyle {
    pub face: Face,
    /// Drawn in link colour with an underline.
    pub link: bool,
}

impl RunStyle {
    const PLAIN: RunStyle = RunStyle {
        face: Face::Regular,
        link: false,
    };
}

/// Text drawn with one style. Text is already restricted to drawable characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn width(&self, size_pt: f32) -> f32 {
        get_metrics(self.style.face).measure_str(&self.text, size_pt)
    }
}

/// Converts inline spans to runs. `base` is the face of un-emphasized text.
pub fn runs_from_spans(spans: &[InlineSpan], base: Face) -> Vec<Run> {
    spans
        .iter()
        .map(|span| {
            let style = match span {
                InlineSpan::Plain(_) => RunStyle {
                    face: base,
                    link: false,
                },
                InlineSpan::Bold(_) => RunStyle {
                    face: Face::Bold,
                    link: false,
                },
                InlineSpan::Link { .. } => RunStyle {
                    face: base,
                    link: true,
                },
            };
            Run {
                text: span.text().to_string(),
                style,
            }
        })
        .collect()
}

/// Breaks `runs` into lines no wider than `max_width` points.
pub fn wrap(runs: &[Run], size_pt: f32, max_width: f32) -> Vec<Vec<Run>> {
    let space_width = get_metrics(Face::Regular).measure_str(" ", size_pt);
    let mut lines = Vec::new();
    let mut line: Vec<Run> = Vec::new();
    let mut line_width = 0.0_f32;

    for word in split_words(runs) {
        for piece in split_overlong(word, size_pt, max_width) {
            let width = word_width(&piece, size_pt);

            if line.is_empty() {
                line_width = width;
            } else if line_width + space_width + width <= max_width {
                let gap = gap_run(&line, &piece);
                push_run(&mut line, gap);
                line_width += space_width + width;
            } else {
                lines.push(std::mem::take(&mut line));
                line_width = width;
            }

            for run in piece {
                push_run(&mut line, run);
            }
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Width of a laid-out line.
pub fn line_width(line: &[Run], size_pt: f32) -> f32 {
    line.iter().map(|run| run.width(size_pt)).sum()
}

type Word = Vec<Run>;

fn split_words(runs: &[Run]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Word = Vec::new();

    for run in runs {
        for c in run.text.chars() {
            if c.is_whitespace() {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                continue;
            }
            match current.last_mut() {
                Some(last) if last.style == run.style => last.text.push(drawable(c)),
                _ => current.push(Run {
                    text: drawable(c).to_string(),
                    style: run.style,
                }),
            }
        }
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn word_width(word: &[Run], size_pt: f32) -> f32 {
    line_width(word, size_pt)
}

/// Splits a word that cannot fit on a line by itself into line-sized pieces.
fn split_overlong(word: Word, size_pt: f32, max_width: f32) -> Vec<Word> {
    if word_width(&word, size_pt) <= max_width {
        return vec![word];
    }

    let mut pieces = Vec::new();
    let mut piece: Word = Vec::new();
    let mut piece_width = 0.0_f32;

    for run in word {
        let metrics = get_metrics(run.style.face);
        for c in run.text.chars() {
            let char_width = metrics.measure_str(c.encode_utf8(&mut [0; 4]), size_pt);
            if !piece.is_empty() && piece_width + char_width > max_width {
                pieces.push(std::mem::take(&mut piece));
                piece_width = 0.0;
            }
            push_run(
                &mut piece,
                Run {
                    text: c.to_string(),
                    style: run.style,
                },
            );
            piece_width += char_width;
        }
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// The space between two words keeps link styling when both sides are link text,
/// so multi-word labels get a continuous underline.
fn gap_run(line: &[Run], next: &[Run]) -> Run {
    let style = match (line.last(), next.first()) {
        (Some(prev), Some(next)) if prev.style.link && prev.style == next.style => prev.style,
        _ => RunStyle::PLAIN,
    };
    Run {
        text: " ".to_string(),
        style,
    }
}

fn push_run(line: &mut Vec<Run>, run: Run) {
    match line.last_mut() {
        Some(last) if last.style == run.style => last.text.push_str(&run.text),
        _ => line.push(run),
    }
}
