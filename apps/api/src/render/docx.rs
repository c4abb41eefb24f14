//! DOCX emitter: a minimal WordprocessingML package built in memory.
//!
//! Blank source lines produce nothing here; each heading is preceded by an empty
//! paragraph instead. Sizes and spacing live in `word/styles.xml`, runs only carry
//! bold and link styling.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::markdown::InlineSpan;
use crate::render::{DocumentSink, ExportError};

const LINK_COLOR: &str = "0066CC";

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#;

/// Title 24pt bold, heading 13pt bold with 6pt after, body 11pt with 4pt after,
/// bullets 2pt after and indented 0.25in. Sizes are half-points, spacing is twips.
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:docDefaults>
<w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault>
<w:pPrDefault><w:pPr><w:spacing w:after="80" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault>
</w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
<w:style w:type="paragraph" w:styleId="ResumeTitle"><w:name w:val="Resume Title"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:jc w:val="left"/></w:pPr><w:rPr><w:b/><w:bCs/><w:sz w:val="48"/><w:szCs w:val="48"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="ResumeHeading"><w:name w:val="Resume Heading"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:after="120"/></w:pPr><w:rPr><w:b/><w:bCs/><w:sz w:val="26"/><w:szCs w:val="26"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr><w:spacing w:after="40"/><w:ind w:left="360" w:hanging="360"/></w:pPr></w:style>
</w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:abstractNum w:abstractNumId="0">
<w:multiLevelType w:val="singleLevel"/>
<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:lvl>
</w:abstractNum>
<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

/// Letter page, half-inch margins.
const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="720" w:right="720" w:bottom="720" w:left="720" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Plain,
    Bold,
    Link,
}

/// Accumulates `w:p` elements for the document body.
#[derive(Debug, Default)]
pub struct DocxSink {
    body: String,
}

impl DocxSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_paragraph(&mut self, style: Option<&str>, spans: &[InlineSpan]) {
        self.body.push_str("<w:p>");
        if let Some(style) = style {
            self.body
                .push_str(&format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#));
        }
        for span in spans {
            let kind = match span {
                InlineSpan::Plain(_) => RunKind::Plain,
                InlineSpan::Bold(_) => RunKind::Bold,
                InlineSpan::Link { .. } => RunKind::Link,
            };
            self.push_run(kind, span.text());
        }
        self.body.push_str("</w:p>");
    }

    fn push_run(&mut self, kind: RunKind, text: &str) {
        self.body.push_str("<w:r>");
        match kind {
            RunKind::Plain => {}
            RunKind::Bold => self.body.push_str("<w:rPr><w:b/></w:rPr>"),
            RunKind::Link => self.body.push_str(&format!(
                r#"<w:rPr><w:color w:val="{LINK_COLOR}"/><w:u w:val="single"/></w:rPr>"#
            )),
        }
        self.body.push_str(r#"<w:t xml:space="preserve">"#);
        self.body.push_str(&xml_text(text));
        self.body.push_str("</w:t></w:r>");
    }

    fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WORDML_NS}"><w:body>{}{SECTION_PROPERTIES}</w:body></w:document>"#,
            self.body
        )
    }
}

impl DocumentSink for DocxSink {
    fn append_title(&mut self, spans: &[InlineSpan]) {
        self.push_paragraph(Some("ResumeTitle"), spans);
    }

    fn append_heading(&mut self, text: &str) {
        self.body.push_str("<w:p/>");
        self.push_paragraph(Some("ResumeHeading"), &[InlineSpan::Plain(text.to_string())]);
    }

    fn append_bullet(&mut self, spans: &[InlineSpan]) {
        self.push_paragraph(Some("ListBullet"), spans);
    }

    fn append_paragraph(&mut self, spans: &[InlineSpan]) {
        self.push_paragraph(None, spans);
    }

    fn append_space(&mut self) {}

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let document = self.document_xml();
        let parts: [(&str, &str); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML),
            ("_rels/.rels", PACKAGE_RELS_XML),
            ("word/document.xml", &document),
            ("word/styles.xml", STYLES_XML),
            ("word/numbering.xml", NUMBERING_XML),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
        ];

        for (name, content) in parts {
            zip.start_file(name, deflated)?;
            zip.write_all(content.as_bytes())?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

/// Escapes text for XML, dropping characters XML 1.0 cannot carry.
fn xml_text(text: &str) -> String {
    let allowed: String = text
        .chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        })
        .collect();
    escape(allowed.as_str()).into_owned()
}

/// Renders a normalized document to DOCX bytes.
pub fn render(markdown: &str) -> Result<Vec<u8>, ExportError> {
    let mut sink = DocxSink::new();
    crate::render::render_document(markdown, &mut sink);
    sink.finish()
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
        let mut file = archive.by_name(name).expect("part exists");
        let mut out = String::new();
        file.read_to_string(&mut out).expect("utf-8 part");
        out
    }

    #[test]
    fn test_package_has_all_parts() {
        let bytes = render("# Jane").expect("render");
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).expect("valid zip");
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/numbering.xml",
            "word/_rels/document.xml.rels",
        ] {
            assert!(names.contains(&part), "missing {part}");
        }
    }

    #[test]
    fn test_blank_lines_emit_nothing() {
        let with_blanks = render("a\n\n\nb").expect("render");
        let without = render("a\nb").expect("render");
        assert_eq!(
            read_part(&with_blanks, "word/document.xml"),
            read_part(&without, "word/document.xml")
        );
    }

    #[test]
    fn test_heading_is_preceded_by_empty_paragraph() {
        let xml = read_part(&render("## Skills").expect("render"), "word/document.xml");
        assert!(xml.contains(r#"<w:p/><w:p><w:pPr><w:pStyle w:val="ResumeHeading"/>"#));
        assert!(xml.contains(">Skills</w:t>"));
    }

    #[test]
    fn test_bullet_runs_carry_styles() {
        let xml = read_part(
            &render("- Built **X** using [Y](http://z)").expect("render"),
            "word/document.xml",
        );
        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(xml.contains(r#"<w:rPr><w:b/></w:rPr><w:t xml:space="preserve">X</w:t>"#));
        assert!(xml.contains(r#"<w:color w:val="0066CC"/><w:u w:val="single"/>"#));
        assert!(xml.contains(">Y</w:t>"));
        assert!(!xml.contains("http://z"));
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = read_part(&render("R&D <team>").expect("render"), "word/document.xml");
        assert!(xml.contains("R&amp;D &lt;team&gt;"));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        assert_eq!(xml_text("a\u{1}b\tc"), "ab\tc");
    }

    #[test]
    fn test_page_setup() {
        let xml = read_part(&render("x").expect("render"), "word/document.xml");
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:top="720" w:right="720" w:bottom="720" w:left="720""#));
    }
}
