//! Minimal DOCX codec over `zip` + `quick-xml`.
//!
//! Reads `word/document.xml` into the paragraph/run model and writes a
//! complete minimal package back out. Only the formatting the annotator
//! needs survives a round trip: bold, italic, highlight, heading styles,
//! page breaks, tabs and soft line breaks. Full WordprocessingML fidelity
//! is out of scope.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use super::model::{Document, Paragraph, ParagraphKind, Run};
use super::DocumentError;

/// Read a `.docx` file into the in-memory model.
///
/// Fails with [`DocumentError::Package`] when the file is not a readable
/// DOCX container — fatal for that single document, per the error taxonomy.
pub fn read_docx(path: &Path) -> Result<Document, DocumentError> {
    let file = File::open(path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| DocumentError::Package(e.to_string()))?;
    let mut part = archive
        .by_name("word/document.xml")
        .map_err(|e| DocumentError::Package(format!("word/document.xml: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    parse_document_xml(&xml)
}

/// Write the model out as a fresh minimal DOCX package.
///
/// `styles.xml` always defines the `Normal` and `Heading1` paragraph styles,
/// so heading paragraphs and yellow highlights never need a fallback
/// rendering.
pub fn write_docx(doc: &Document, path: &Path) -> Result<(), DocumentError> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let opts: SimpleFileOptions = SimpleFileOptions::default();

    let parts: [(&str, String); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
        ("word/styles.xml", STYLES_XML.to_string()),
        ("word/document.xml", document_xml(doc)),
    ];

    for (name, content) in parts {
        zip.start_file(name, opts)
            .map_err(|e| DocumentError::Package(e.to_string()))?;
        zip.write_all(content.as_bytes())?;
    }

    zip.finish()
        .map_err(|e| DocumentError::Package(e.to_string()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

fn parse_document_xml(xml: &str) -> Result<Document, DocumentError> {
    let mut reader = Reader::from_str(xml);

    let mut doc = Document::new();
    let mut para: Option<Paragraph> = None;
    let mut run: Option<Run> = None;
    let mut in_rpr = false;
    let mut in_ppr = false;
    let mut in_text = false;
    let mut saw_page_break = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DocumentError::Xml(e.to_string()))?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    para = Some(Paragraph::default());
                    saw_page_break = false;
                }
                b"w:r" => {
                    if para.is_some() {
                        run = Some(Run::default());
                    }
                }
                b"w:rPr" => in_rpr = true,
                b"w:pPr" => in_ppr = true,
                b"w:t" => in_text = run.is_some(),
                _ => apply_inline_element(&e, &mut para, &mut run, in_rpr, in_ppr, &mut saw_page_break),
            },

            Event::Empty(e) => match e.name().as_ref() {
                // An empty <w:p/> is a blank paragraph.
                b"w:p" => doc.push(Paragraph::default()),
                b"w:r" => {
                    if let Some(p) = para.as_mut() {
                        p.runs.push(Run::default());
                    }
                }
                _ => apply_inline_element(&e, &mut para, &mut run, in_rpr, in_ppr, &mut saw_page_break),
            },

            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(mut p) = para.take() {
                        if saw_page_break && p.text().is_empty() {
                            p.kind = ParagraphKind::PageBreak;
                            p.runs.clear();
                        }
                        doc.push(p);
                    }
                }
                b"w:r" => {
                    if let (Some(p), Some(r)) = (para.as_mut(), run.take()) {
                        p.runs.push(r);
                    }
                }
                b"w:rPr" => in_rpr = false,
                b"w:pPr" => in_ppr = false,
                b"w:t" => in_text = false,
                _ => {}
            },

            Event::Text(t) => {
                if in_text {
                    if let Some(r) = run.as_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| DocumentError::Xml(e.to_string()))?;
                        r.text.push_str(&text);
                    }
                }
            }

            Event::Eof => break,
            _ => {}
        }
    }

    Ok(doc)
}

/// Handle formatting and break elements that can appear as either start or
/// empty tags.
fn apply_inline_element(
    e: &BytesStart<'_>,
    para: &mut Option<Paragraph>,
    run: &mut Option<Run>,
    in_rpr: bool,
    in_ppr: bool,
    saw_page_break: &mut bool,
) {
    match e.name().as_ref() {
        b"w:b" => {
            if in_rpr {
                if let Some(r) = run.as_mut() {
                    r.format.bold = toggle_on(e);
                }
            }
        }
        b"w:i" => {
            if in_rpr {
                if let Some(r) = run.as_mut() {
                    r.format.italic = toggle_on(e);
                }
            }
        }
        b"w:highlight" => {
            if in_rpr {
                if let Some(r) = run.as_mut() {
                    let val = attr_value(e, "w:val");
                    r.format.highlight = val.as_deref() != Some("none");
                }
            }
        }
        b"w:pStyle" => {
            if in_ppr {
                if let (Some(p), Some(val)) = (para.as_mut(), attr_value(e, "w:val")) {
                    if let Some(level) = val.strip_prefix("Heading") {
                        p.kind = ParagraphKind::Heading(level.parse().unwrap_or(1));
                    }
                }
            }
        }
        b"w:br" => {
            if attr_value(e, "w:type").as_deref() == Some("page") {
                *saw_page_break = true;
            } else if let Some(r) = run.as_mut() {
                r.text.push('\n');
            }
        }
        // <w:tab/> inside pPr/rPr is a tab-stop definition, not text.
        b"w:tab" => {
            if !in_rpr && !in_ppr {
                if let Some(r) = run.as_mut() {
                    r.text.push('\t');
                }
            }
        }
        _ => {}
    }
}

/// Boolean run property: present means on unless `w:val` says otherwise.
fn toggle_on(e: &BytesStart<'_>) -> bool {
    match attr_value(e, "w:val").as_deref() {
        Some("false") | Some("0") | Some("none") => false,
        _ => true,
    }
}

fn attr_value(e: &BytesStart<'_>, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn document_xml(doc: &Document) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push_str(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );

    for para in &doc.paragraphs {
        write_paragraph(&mut out, para);
    }

    out.push_str(r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>"#);
    out.push_str("</w:body></w:document>");
    out
}

fn write_paragraph(out: &mut String, para: &Paragraph) {
    if para.kind == ParagraphKind::PageBreak {
        out.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
        return;
    }

    out.push_str("<w:p>");
    if let ParagraphKind::Heading(level) = para.kind {
        out.push_str(&format!(
            r#"<w:pPr><w:pStyle w:val="Heading{level}"/></w:pPr>"#
        ));
    }
    for run in &para.runs {
        write_run(out, run);
    }
    out.push_str("</w:p>");
}

fn write_run(out: &mut String, run: &Run) {
    out.push_str("<w:r>");

    let f = run.format;
    if f.bold || f.italic || f.highlight {
        out.push_str("<w:rPr>");
        if f.bold {
            out.push_str("<w:b/>");
        }
        if f.italic {
            out.push_str("<w:i/>");
        }
        if f.highlight {
            out.push_str(r#"<w:highlight w:val="yellow"/>"#);
        }
        out.push_str("</w:rPr>");
    }

    // Embedded newlines become soft line breaks.
    for (i, segment) in run.text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<w:br/>");
        }
        out.push_str(r#"<w:t xml:space="preserve">"#);
        out.push_str(&escape(segment));
        out.push_str("</w:t>");
    }

    out.push_str("</w:r>");
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="Normal" w:default="1"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style></w:styles>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::RunFormat;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.push(Paragraph {
            kind: ParagraphKind::Heading(1),
            runs: vec![Run::new("Resolution of the Sole Shareholder")],
        });
        doc.push(Paragraph {
            kind: ParagraphKind::Body,
            runs: vec![
                Run::new("RESOLVED, that "),
                Run::bold("the Company"),
                Run::with_format(
                    " be incorporated",
                    RunFormat {
                        italic: true,
                        highlight: true,
                        ..RunFormat::default()
                    },
                ),
            ],
        });
        doc.push(Paragraph::page_break());
        doc.push(Paragraph::from_text("Line one\nLine two"));
        doc
    }

    #[test]
    fn round_trip_preserves_structure_and_formats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.docx");

        let original = sample_document();
        write_docx(&original, &path).unwrap();
        let loaded = read_docx(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn non_zip_file_is_a_package_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.docx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        match read_docx(&path) {
            Err(DocumentError::Package(_)) => {}
            other => panic!("expected Package error, got {other:?}"),
        }
    }

    #[test]
    fn zip_without_document_part_is_a_package_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");

        let file = File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file("mimetype", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"application/octet-stream").unwrap();
        zip.finish().unwrap();

        match read_docx(&path) {
            Err(DocumentError::Package(msg)) => {
                assert!(msg.contains("word/document.xml"), "unexpected message: {msg}")
            }
            other => panic!("expected Package error, got {other:?}"),
        }
    }

    #[test]
    fn escaped_characters_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("escaped.docx");

        let mut doc = Document::new();
        doc.push(Paragraph::from_text("Fees < 5% & \"charges\" > nil"));
        write_docx(&doc, &path).unwrap();

        let loaded = read_docx(&path).unwrap();
        assert_eq!(loaded.paragraphs[0].text(), "Fees < 5% & \"charges\" > nil");
    }

    #[test]
    fn parses_plain_wordprocessingml() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>
<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Bold </w:t></w:r><w:r><w:t>plain</w:t></w:r></w:p>
<w:p/>
</w:body></w:document>"#;

        let doc = parse_document_xml(xml).unwrap();
        assert_eq!(doc.paragraphs.len(), 3);
        assert_eq!(doc.paragraphs[0].kind, ParagraphKind::Heading(2));
        assert_eq!(doc.paragraphs[1].text(), "Bold plain");
        assert!(doc.paragraphs[1].runs[0].format.bold);
        assert!(!doc.paragraphs[1].runs[1].format.bold);
        assert_eq!(doc.paragraphs[2].text(), "");
    }
}
