//! In-memory document model: an ordered sequence of paragraphs, each an
//! ordered sequence of styled text runs.
//!
//! Invariant: joining every paragraph's text with newlines reproduces the
//! document's linear text. The annotator only inserts runs and paragraphs;
//! nothing is ever reordered or deleted.

/// Character formatting carried by a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    /// Rendered as a yellow text highlight by the DOCX writer.
    pub highlight: bool,
}

/// A contiguous span of identically formatted text within a paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub format: RunFormat,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: RunFormat::default(),
        }
    }

    pub fn with_format(text: impl Into<String>, format: RunFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::with_format(
            text,
            RunFormat {
                bold: true,
                ..RunFormat::default()
            },
        )
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::with_format(
            text,
            RunFormat {
                italic: true,
                ..RunFormat::default()
            },
        )
    }
}

/// Structural role of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParagraphKind {
    #[default]
    Body,
    /// Styled heading; the level maps to the `Heading{n}` paragraph style.
    Heading(u8),
    /// A paragraph whose only content is a page break.
    PageBreak,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            kind: ParagraphKind::Body,
            runs: vec![Run::new(text)],
        }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: ParagraphKind::Heading(level),
            runs: vec![Run::new(text)],
        }
    }

    pub fn page_break() -> Self {
        Self {
            kind: ParagraphKind::PageBreak,
            runs: Vec::new(),
        }
    }

    /// Concatenated text of all runs, in order.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// An ordered sequence of paragraphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Every paragraph's text joined by newlines, blank paragraphs included.
    pub fn linear_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
