//! Export of a normalized resume to PDF, DOCX or markdown.
//!
//! Both binary formats share one classification pass (`parse_blocks`) and differ only
//! in the `DocumentSink` that consumes the blocks. Rendering is pure and in-memory.

pub mod docx;
pub mod handlers;
pub mod pdf;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::markdown::{filename_base, parse_blocks, Block, InlineSpan};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid format '{0}'. Use 'pdf', 'docx', or 'md'")]
    UnsupportedFormat(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("DOCX packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Document sink
// ────────────────────────────────────────────────────────────────────────────

/// An output back end fed one block at a time, in document order.
pub trait DocumentSink {
    fn append_title(&mut self, spans: &[InlineSpan]);
    fn append_heading(&mut self, text: &str);
    fn append_bullet(&mut self, spans: &[InlineSpan]);
    fn append_paragraph(&mut self, spans: &[InlineSpan]);
    /// A blank line in the source.
    fn append_space(&mut self);
    /// Serializes everything appended so far.
    fn finish(self) -> Result<Vec<u8>, ExportError>
    where
        Self: Sized;
}

/// Feeds `blocks` into `sink` without reordering or merging.
pub fn render_blocks<S: DocumentSink>(blocks: &[Block], sink: &mut S) {
    for block in blocks {
        match block {
            Block::Title(spans) => sink.append_title(spans),
            Block::Heading(text) => sink.append_heading(text),
            Block::Bullet(spans) => sink.append_bullet(spans),
            Block::Paragraph(spans) => sink.append_paragraph(spans),
            Block::Blank => sink.append_space(),
        }
    }
}

pub fn render_document<S: DocumentSink>(markdown: &str, sink: &mut S) {
    render_blocks(&parse_blocks(markdown), sink);
}

// ────────────────────────────────────────────────────────────────────────────
// Export formats
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Markdown => "text/markdown",
        }
    }

    /// Whether rendering is CPU work that belongs off the async runtime.
    pub fn is_binary(self) -> bool {
        !matches!(self, ExportFormat::Markdown)
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            "md" => Ok(ExportFormat::Markdown),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A fully materialized export, ready to hand to the caller.
#[derive(Debug)]
pub struct Export {
    pub filename: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

pub fn export(markdown: &str, format: ExportFormat) -> Result<Export, ExportError> {
    let bytes = match format {
        ExportFormat::Pdf => pdf::render(markdown)?,
        ExportFormat::Docx => docx::render(markdown)?,
        ExportFormat::Markdown => markdown.as_bytes().to_vec(),
    };

    Ok(Export {
        filename: format!("{}.{}", filename_base(markdown), format.extension()),
        media_type: format.media_type(),
        bytes,
    })
}
