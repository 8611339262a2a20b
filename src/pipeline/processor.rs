//! Document review orchestrator.
//!
//! Single entry point that drives the full review pipeline per document:
//! read → extract → classify → rule checks → jurisdiction check →
//! aggregate → annotate → persist, then cross-references the matched
//! document types against the process checklists for the summary report.
//!
//! Uses trait-based DI for the embedding and language-model collaborators
//! so the orchestrator remains fully testable with mock implementations.

use std::path::{Path, PathBuf};

use crate::config::ReviewConfig;
use crate::document::{extract_text, read_docx, write_docx, DocumentError};
use crate::pipeline::annotate::annotate_document;
use crate::pipeline::checklist::detect_process;
use crate::pipeline::checks::{check_missing_clauses, check_placeholders, RuleBook};
use crate::pipeline::jurisdiction::JurisdictionDetector;
use crate::pipeline::report::{aggregate_issues, Issue, SummaryReport};
use crate::pipeline::template_index::{EmbeddingModel, IndexError, TemplateIndex};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that abort processing of a single document. A batch treats these
/// as per-file: the failing document is skipped, the rest continue.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Classification failed: {0}")]
    Index(#[from] IndexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input path: {0}")]
    InvalidPath(PathBuf),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Per-document result of one review pass.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub file_name: String,
    /// Assigned template identifier. `None` only when the index returned no
    /// hit or the top score fell below the configured similarity floor.
    pub doc_type: Option<String>,
    pub similarity: Option<f32>,
    pub issues: Vec<Issue>,
    /// Issues annotated in place at their evidence span.
    pub placed: usize,
    /// Issues routed to the appended review-comments section instead.
    pub unplaced: usize,
    pub reviewed_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct ReviewPipeline<'a> {
    index: &'a TemplateIndex,
    embedder: &'a dyn EmbeddingModel,
    rules: &'a RuleBook,
    detector: Option<&'a JurisdictionDetector>,
    config: &'a ReviewConfig,
}

impl<'a> ReviewPipeline<'a> {
    pub fn new(
        index: &'a TemplateIndex,
        embedder: &'a dyn EmbeddingModel,
        rules: &'a RuleBook,
        detector: Option<&'a JurisdictionDetector>,
        config: &'a ReviewConfig,
    ) -> Self {
        Self {
            index,
            embedder,
            rules,
            detector,
            config,
        }
    }

    /// Review one document and persist its annotated copy under
    /// `output_dir` as `reviewed_<file name>`.
    pub fn review_file(
        &self,
        path: &Path,
        output_dir: &Path,
    ) -> Result<DocumentOutcome, ProcessingError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .ok_or_else(|| ProcessingError::InvalidPath(path.to_path_buf()))?;

        let doc = read_docx(path)?;
        let text = extract_text(&doc);

        let (doc_type, similarity) = self.classify(&text)?;
        tracing::info!(
            file = %file_name,
            doc_type = doc_type.as_deref().unwrap_or("<unclassified>"),
            similarity = similarity.unwrap_or(0.0),
            "Document classified"
        );

        let (placeholders, missing_clauses) = match doc_type.as_deref() {
            Some(t) => (
                check_placeholders(&text, t, self.rules),
                check_missing_clauses(&text, t, self.rules),
            ),
            None => (Vec::new(), Vec::new()),
        };

        let type_label = doc_type.as_deref().unwrap_or(&file_name);
        let findings = match self.detector {
            Some(detector) => detector.detect_or_empty(&text, type_label),
            None => Vec::new(),
        };

        let issues = aggregate_issues(&file_name, &placeholders, &missing_clauses, &findings);
        tracing::debug!(
            file = %file_name,
            placeholders = placeholders.len(),
            missing_clauses = missing_clauses.len(),
            jurisdiction = findings.len(),
            "Checks complete"
        );

        let annotated = annotate_document(&doc, &issues);

        std::fs::create_dir_all(output_dir)?;
        let reviewed_path = output_dir.join(format!("reviewed_{file_name}"));
        write_docx(&annotated.document, &reviewed_path)?;

        let unplaced = annotated.not_found.len();
        let placed = issues.len() - unplaced;
        tracing::info!(
            file = %file_name,
            issues = issues.len(),
            placed,
            unplaced,
            reviewed = %reviewed_path.display(),
            "Review complete"
        );

        Ok(DocumentOutcome {
            file_name,
            doc_type,
            similarity,
            issues,
            placed,
            unplaced,
            reviewed_path,
        })
    }

    /// Review a batch sequentially and build the summary report.
    ///
    /// A document that fails to open or persist is logged and skipped; it
    /// never aborts the batch.
    pub fn review_batch(&self, paths: &[PathBuf], output_dir: &Path) -> SummaryReport {
        let mut report = SummaryReport::new();
        let mut uploaded_doc_types: Vec<String> = Vec::new();

        for path in paths {
            match self.review_file(path, output_dir) {
                Ok(outcome) => {
                    if let Some(doc_type) = outcome.doc_type {
                        uploaded_doc_types.push(doc_type);
                    }
                    report.issues_found.extend(outcome.issues);
                }
                Err(e) => {
                    tracing::error!(file = %path.display(), error = %e, "Skipping document");
                }
            }
        }

        if let Some(m) = detect_process(&uploaded_doc_types) {
            report.process = Some(m.process);
            report.documents_uploaded = m.matched;
            report.required_documents = m.required;
            report.missing_document = m.missing;
        }

        report
    }

    /// Top-1 nearest template, subject to the optional similarity floor.
    fn classify(&self, text: &str) -> Result<(Option<String>, Option<f32>), IndexError> {
        let hits = self.index.nearest(text, 1, self.embedder)?;
        let Some(top) = hits.into_iter().next() else {
            return Ok((None, None));
        };

        if let Some(floor) = self.config.min_similarity {
            if top.score < floor {
                tracing::debug!(
                    best = %top.title,
                    score = top.score,
                    floor,
                    "Top match below similarity floor; leaving unclassified"
                );
                return Ok((None, Some(top.score)));
            }
        }

        Ok((Some(top.title), Some(top.score)))
    }
}
