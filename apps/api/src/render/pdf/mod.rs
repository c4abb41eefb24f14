//! PDF emitter: flows blocks top to bottom on US Letter pages with lopdf.
//!
//! Text is set in the base-14 Helvetica faces, so no font program is embedded.
//! When the next line does not fit above the bottom margin a new page is started.

pub mod metrics;
pub mod wrap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::markdown::InlineSpan;
use crate::render::{DocumentSink, ExportError};

use self::metrics::Face;
use self::wrap::{runs_from_spans, wrap, Run, RunStyle};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
/// Half an inch on all sides.
const MARGIN: f32 = 36.0;
const LEADING: f32 = 1.2;
const BLANK_SPACER: f32 = 7.2;
const UNDERLINE_OFFSET: f32 = 1.5;
const UNDERLINE_WIDTH: f32 = 0.5;

const TEXT_RGB: [f32; 3] = [0.0, 0.0, 0.0];
const LINK_RGB: [f32; 3] = [0.0, 0.0, 1.0];

struct BlockStyle {
    size: f32,
    base: Face,
    indent: f32,
    space_before: f32,
    space_after: f32,
}

const TITLE: BlockStyle = BlockStyle {
    size: 24.0,
    base: Face::Bold,
    indent: 0.0,
    space_before: 0.0,
    space_after: 8.0,
};

const HEADING: BlockStyle = BlockStyle {
    size: 13.0,
    base: Face::Bold,
    indent: 0.0,
    space_before: 12.0,
    space_after: 6.0,
};

const PARAGRAPH: BlockStyle = BlockStyle {
    size: 11.0,
    base: Face::Regular,
    indent: 0.0,
    space_before: 0.0,
    space_after: 4.0,
};

const BULLET: BlockStyle = BlockStyle {
    size: 11.0,
    base: Face::Regular,
    indent: 20.0,
    space_before: 0.0,
    space_after: 2.0,
};

/// Collects content-stream operations page by page.
pub struct PdfSink {
    finished_pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    /// Top of the free area on the current page, in PDF user space.
    cursor_y: f32,
}

impl Default for PdfSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSink {
    pub fn new() -> Self {
        Self {
            finished_pages: Vec::new(),
            current: Vec::new(),
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor_y >= PAGE_HEIGHT - MARGIN
    }

    fn new_page(&mut self) {
        self.finished_pages.push(std::mem::take(&mut self.current));
        self.cursor_y = PAGE_HEIGHT - MARGIN;
    }

    /// Vertical space never carries over to the next page.
    fn skip(&mut self, height: f32) {
        self.cursor_y = (self.cursor_y - height).max(MARGIN);
    }

    fn draw_block(&mut self, runs: &[Run], style: &BlockStyle) {
        if !self.at_page_top() {
            self.skip(style.space_before);
        }

        let x = MARGIN + style.indent;
        let max_width = PAGE_WIDTH - 2.0 * MARGIN - style.indent;
        let leading = style.size * LEADING;

        for line in wrap(runs, style.size, max_width) {
            if self.cursor_y - leading < MARGIN && !self.at_page_top() {
                self.new_page();
            }
            let baseline = self.cursor_y - style.size;
            self.draw_line(&line, x, baseline, style.size);
            self.cursor_y -= leading;
        }

        self.skip(style.space_after);
    }

    fn draw_line(&mut self, line: &[Run], x: f32, baseline: f32, size: f32) {
        let mut underlines = Vec::new();
        let mut pen_x = x;

        self.current.push(Operation::new("BT", vec![]));
        self.current.push(Operation::new(
            "Td",
            vec![Object::Real(x), Object::Real(baseline)],
        ));

        for run in line {
            let width = run.width(size);
            let rgb = if run.style.link { LINK_RGB } else { TEXT_RGB };

            self.current.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(run.style.face.resource_name().as_bytes().to_vec()),
                    Object::Real(size),
                ],
            ));
            self.current
                .push(Operation::new("rg", rgb.iter().copied().map(Object::Real).collect()));
            self.current.push(Operation::new(
                "Tj",
                vec![Object::string_literal(run.text.as_str())],
            ));

            if run.style.link {
                underlines.push((pen_x, pen_x + width));
            }
            pen_x += width;
        }

        self.current.push(Operation::new("ET", vec![]));

        if !underlines.is_empty() {
            self.draw_underlines(&underlines, baseline - UNDERLINE_OFFSET);
        }
    }

    fn draw_underlines(&mut self, segments: &[(f32, f32)], y: f32) {
        self.current.push(Operation::new("q", vec![]));
        self.current.push(Operation::new(
            "RG",
            LINK_RGB.iter().copied().map(Object::Real).collect(),
        ));
        self.current
            .push(Operation::new("w", vec![Object::Real(UNDERLINE_WIDTH)]));
        for &(start, end) in segments {
            self.current.push(Operation::new(
                "m",
                vec![Object::Real(start), Object::Real(y)],
            ));
            self.current
                .push(Operation::new("l", vec![Object::Real(end), Object::Real(y)]));
            self.current.push(Operation::new("S", vec![]));
        }
        self.current.push(Operation::new("Q", vec![]));
    }
}

impl DocumentSink for PdfSink {
    fn append_title(&mut self, spans: &[InlineSpan]) {
        self.draw_block(&runs_from_spans(spans, TITLE.base), &TITLE);
    }

    fn append_heading(&mut self, text: &str) {
        let runs = [Run {
            text: text.to_string(),
            style: RunStyle {
                face: HEADING.base,
                link: false,
            },
        }];
        self.draw_block(&runs, &HEADING);
    }

    fn append_bullet(&mut self, spans: &[InlineSpan]) {
        self.draw_block(&runs_from_spans(spans, BULLET.base), &BULLET);
    }

    fn append_paragraph(&mut self, spans: &[InlineSpan]) {
        self.draw_block(&runs_from_spans(spans, PARAGRAPH.base), &PARAGRAPH);
    }

    fn append_space(&mut self) {
        self.skip(BLANK_SPACER);
    }

    fn finish(mut self) -> Result<Vec<u8>, ExportError> {
        self.finished_pages.push(std::mem::take(&mut self.current));

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_ids: Vec<(Face, lopdf::ObjectId)> = [Face::Regular, Face::Bold]
            .into_iter()
            .map(|face| {
                let id = doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => face.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                });
                (face, id)
            })
            .collect();

        let mut fonts = lopdf::Dictionary::new();
        for (face, id) in font_ids {
            fonts.set(face.resource_name(), Object::Reference(id));
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let mut kids: Vec<Object> = Vec::with_capacity(self.finished_pages.len());
        for operations in self.finished_pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Renders a normalized document to PDF bytes.
pub fn render(markdown: &str) -> Result<Vec<u8>, ExportError> {
    let mut sink = PdfSink::new();
    crate::render::render_document(markdown, &mut sink);
    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Jane Doe\n\
        [jane@doe.dev](mailto:jane@doe.dev) | Remote\n\
        \n\
        ## Experience\n\
        - Built **X** using [Y](http://z)\n\
        - Cut build times (from 20m to 4m)";

    fn page_count(bytes: &[u8]) -> usize {
        let doc = Document::load_mem(bytes).expect("rendered pdf parses");
        doc.get_pages().len()
    }

    #[test]
    fn test_render_produces_single_page_pdf() {
        let bytes = render(SAMPLE).expect("render");
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_empty_document_still_has_a_page() {
        let bytes = render("").expect("render");
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_overflow_continues_on_new_page() {
        let long: Vec<String> = (0..120).map(|i| format!("- bullet number {i}")).collect();
        let bytes = render(&long.join("\n")).expect("render");
        assert!(page_count(&bytes) >= 2);
    }

    #[test]
    fn test_link_draws_underline() {
        let mut sink = PdfSink::new();
        sink.append_paragraph(&[InlineSpan::Link {
            label: "GitHub".into(),
            target: "https://github.com/jane".into(),
        }]);
        let ops: Vec<&str> = sink.current.iter().map(|op| op.operator.as_str()).collect();
        assert!(ops.contains(&"RG"));
        assert!(ops.contains(&"S"));
    }

    #[test]
    fn test_link_target_is_not_embedded() {
        let mut sink = PdfSink::new();
        sink.append_bullet(&[InlineSpan::Link {
            label: "Y".into(),
            target: "http://z".into(),
        }]);
        let encoded = Content {
            operations: sink.current.clone(),
        }
        .encode()
        .expect("encode");
        let stream = String::from_utf8_lossy(&encoded);
        assert!(stream.contains("(Y)"));
        assert!(!stream.contains("http://z"));
    }

    #[test]
    fn test_blocks_flow_downwards() {
        let mut sink = PdfSink::new();
        let start = sink.cursor_y;
        sink.append_title(&[InlineSpan::Plain("Jane".into())]);
        let after_title = sink.cursor_y;
        sink.append_space();
        assert!(after_title < start);
        assert!((after_title - sink.cursor_y - BLANK_SPACER).abs() < 1e-3);
    }

    #[test]
    fn test_heading_spacing_skipped_at_page_top() {
        let mut sink = PdfSink::new();
        sink.append_heading("Skills");
        let expected = PAGE_HEIGHT - MARGIN - HEADING.size * LEADING - HEADING.space_after;
        assert!((sink.cursor_y - expected).abs() < 1e-3);
    }
}
