//! Linear text extraction — the input to every downstream check.

use std::path::Path;

use super::docx::read_docx;
use super::model::Document;
use super::DocumentError;

/// Linear text of a document: every paragraph whose text is non-empty after
/// trimming, in order, joined by newlines. Empty documents yield "".
pub fn extract_text(doc: &Document) -> String {
    doc.paragraphs
        .iter()
        .map(|p| p.text())
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read a file and extract its linear text.
///
/// `.docx` files go through the DOCX codec; `.txt` files are read as UTF-8.
/// Anything else is [`DocumentError::UnsupportedFormat`].
pub fn read_document_text(path: &Path) -> Result<String, DocumentError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "docx" => Ok(extract_text(&read_docx(path)?)),
        "txt" => {
            let bytes = std::fs::read(path)?;
            String::from_utf8(bytes).map_err(|e| DocumentError::Encoding(e.to_string()))
        }
        other => Err(DocumentError::UnsupportedFormat(other.to_string())),
    }
}
