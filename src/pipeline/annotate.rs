//! Annotator/reconciler: place every issue back onto the document.
//!
//! Each issue either gets a visible in-place annotation (highlighted match
//! plus an inline italic remark) or a block in an appended review-comments
//! section — never both, never neither. That accounting is the module's
//! correctness contract.
//!
//! Matching is strictly sequential and first-match. Issues splice runs in
//! place, so a later issue matches against the current, already-spliced run
//! texts; evidence that spanned an earlier split point will be reported as
//! not found. That interference is intended behavior, not a defect to patch.

use regex::Regex;

use crate::document::{Document, Paragraph, ParagraphKind, Run, RunFormat};
use crate::pipeline::report::Issue;

pub const REVIEW_SECTION_HEADING: &str = "Review Comments (Auto-generated)";

/// Result of reconciling issues onto a document.
#[derive(Debug, Clone)]
pub struct AnnotatedDocument {
    pub document: Document,
    /// Issues with no locatable evidence; rendered in the appended section.
    pub not_found: Vec<Issue>,
}

/// Annotate a copy of `source` with `issues` (already filtered to this
/// document). The input document is never mutated.
pub fn annotate_document(source: &Document, issues: &[Issue]) -> AnnotatedDocument {
    let mut doc = source.clone();
    let mut not_found: Vec<Issue> = Vec::new();

    // Appended paragraphs are never scanned for evidence.
    let scan_limit = doc.paragraphs.len();

    for issue in issues {
        let placed = match evidence_text(issue) {
            Some(evidence) => try_place(&mut doc.paragraphs[..scan_limit], evidence, &issue.issue),
            None => false,
        };

        if !placed {
            not_found.push(issue.clone());
        }
    }

    if !not_found.is_empty() {
        append_review_section(&mut doc, &not_found);
    }

    AnnotatedDocument { document: doc, not_found }
}

/// Evidence used to locate an issue: the snippet when non-empty, else the
/// section label. Issues with neither are unlocatable.
fn evidence_text(issue: &Issue) -> Option<&str> {
    issue
        .snippet
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| issue.section.as_deref().filter(|s| !s.is_empty()))
}

/// Scan paragraphs in order and splice the annotation into the first one
/// whose text contains the evidence (case-insensitive). Returns false when
/// nothing was spliced.
fn try_place(paragraphs: &mut [Paragraph], evidence: &str, issue_text: &str) -> bool {
    let needle = evidence.to_lowercase();

    let Some(paragraph) = paragraphs
        .iter_mut()
        .find(|p| p.text().to_lowercase().contains(&needle))
    else {
        return false;
    };

    // Recover the exact-case span as it appears in the paragraph.
    let Ok(pattern) = Regex::new(&format!("(?i){}", regex::escape(evidence.trim()))) else {
        return false;
    };
    let paragraph_text = paragraph.text();
    let Some(found) = pattern.find(&paragraph_text) else {
        return false;
    };

    splice_annotation(paragraph, found.as_str(), issue_text)
}

/// Split the first run containing `matched` into before / highlighted match
/// / italic remark / after. If the match spans run boundaries, nothing is
/// modified and the issue is treated as not found.
fn splice_annotation(paragraph: &mut Paragraph, matched: &str, issue_text: &str) -> bool {
    for i in 0..paragraph.runs.len() {
        let Some(pos) = paragraph.runs[i].text.find(matched) else {
            continue;
        };

        let format = paragraph.runs[i].format;
        let after = paragraph.runs[i].text[pos + matched.len()..].to_string();
        paragraph.runs[i].text.truncate(pos);

        let mut inserted = vec![
            Run::with_format(
                matched,
                RunFormat {
                    highlight: true,
                    ..format
                },
            ),
            Run::italic(format!("  <<COMMENT: {issue_text}>>")),
        ];
        if !after.is_empty() {
            inserted.push(Run::with_format(after, format));
        }
        paragraph.runs.splice(i + 1..i + 1, inserted);
        return true;
    }
    false
}

/// Page break, heading, then one Document/Issue/Suggestion block per issue.
fn append_review_section(doc: &mut Document, not_found: &[Issue]) {
    doc.push(Paragraph::page_break());
    doc.push(Paragraph::heading(1, REVIEW_SECTION_HEADING));

    for issue in not_found {
        doc.push(Paragraph {
            kind: ParagraphKind::Body,
            runs: vec![
                Run::bold("Document: "),
                Run::new(issue.document.clone()),
                Run::bold("\nIssue: "),
                Run::new(issue.issue.clone()),
                Run::bold("\nSuggestion: "),
                Run::new(issue.suggestion.clone()),
            ],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::report::Severity;

    fn issue(snippet: Option<&str>, text: &str) -> Issue {
        Issue {
            document: "resolution.docx".into(),
            issue: text.into(),
            severity: Severity::High,
            suggestion: "Fix it".into(),
            snippet: snippet.map(String::from),
            section: None,
        }
    }

    fn doc_with_paragraphs(paragraphs: &[&str]) -> Document {
        let mut doc = Document::new();
        for p in paragraphs {
            doc.push(Paragraph::from_text(*p));
        }
        doc
    }

    fn highlighted_texts(doc: &Document) -> Vec<String> {
        doc.paragraphs
            .iter()
            .flat_map(|p| &p.runs)
            .filter(|r| r.format.highlight)
            .map(|r| r.text.clone())
            .collect()
    }

    #[test]
    fn locatable_issue_is_highlighted_in_place() {
        let doc = doc_with_paragraphs(&["The Company shall be governed by Dubai Courts."]);
        let issues = vec![issue(Some("Dubai Courts"), "Wrong jurisdiction found: 'Dubai Courts'")];

        let annotated = annotate_document(&doc, &issues);

        assert!(annotated.not_found.is_empty());
        assert_eq!(highlighted_texts(&annotated.document), vec!["Dubai Courts"]);

        let para = &annotated.document.paragraphs[0];
        assert_eq!(para.runs[0].text, "The Company shall be governed by ");
        assert_eq!(para.runs[1].text, "Dubai Courts");
        assert!(para.runs[1].format.highlight);
        assert_eq!(
            para.runs[2].text,
            "  <<COMMENT: Wrong jurisdiction found: 'Dubai Courts'>>"
        );
        assert!(para.runs[2].format.italic);
        assert_eq!(para.runs[3].text, ".");
        // The spliced paragraph still reads in order.
        assert_eq!(
            para.text(),
            "The Company shall be governed by Dubai Courts  <<COMMENT: Wrong jurisdiction found: 'Dubai Courts'>>."
        );
        // No review section was appended.
        assert_eq!(annotated.document.paragraphs.len(), 1);
    }

    #[test]
    fn case_insensitive_match_keeps_exact_case() {
        let doc = doc_with_paragraphs(&["Please fill [ Insert Company Name ] before filing."]);
        let issues = vec![issue(Some("[ insert company name ]"), "Unfilled placeholder")];

        let annotated = annotate_document(&doc, &issues);

        assert!(annotated.not_found.is_empty());
        assert_eq!(
            highlighted_texts(&annotated.document),
            vec!["[ Insert Company Name ]"]
        );
    }

    #[test]
    fn unlocatable_issue_goes_to_review_section() {
        let doc = doc_with_paragraphs(&["Nothing relevant here."]);
        let issues = vec![issue(Some("Dubai Courts"), "Wrong jurisdiction")];

        let annotated = annotate_document(&doc, &issues);

        assert_eq!(annotated.not_found.len(), 1);
        let paras = &annotated.document.paragraphs;
        // body + page break + heading + one block
        assert_eq!(paras.len(), 4);
        assert_eq!(paras[1].kind, ParagraphKind::PageBreak);
        assert_eq!(paras[2].kind, ParagraphKind::Heading(1));
        assert_eq!(paras[2].text(), REVIEW_SECTION_HEADING);
        assert_eq!(
            paras[3].text(),
            "Document: resolution.docx\nIssue: Wrong jurisdiction\nSuggestion: Fix it"
        );
        assert!(paras[3].runs[0].format.bold);
        assert!(!paras[3].runs[1].format.bold);
    }

    #[test]
    fn every_issue_lands_exactly_once() {
        let doc = doc_with_paragraphs(&[
            "Governed by Dubai Courts.",
            "Signed at [insert date].",
        ]);
        let issues = vec![
            issue(Some("Dubai Courts"), "Wrong jurisdiction"),
            issue(Some("[insert date]"), "Unfilled placeholder"),
            issue(Some("absent evidence"), "Missing clause"),
            issue(None, "No evidence at all"),
        ];

        let annotated = annotate_document(&doc, &issues);

        let placed = highlighted_texts(&annotated.document).len();
        let blocks = annotated
            .document
            .paragraphs
            .iter()
            .filter(|p| p.text().starts_with("Document: "))
            .count();

        assert_eq!(placed, 2);
        assert_eq!(annotated.not_found.len(), 2);
        assert_eq!(blocks, annotated.not_found.len());
        assert_eq!(placed + annotated.not_found.len(), issues.len());
    }

    #[test]
    fn empty_snippet_falls_back_to_section_label() {
        let doc = doc_with_paragraphs(&["See the Governing Law section for details."]);
        let mut it = issue(Some(""), "Jurisdiction unclear");
        it.section = Some("Governing Law".into());

        let annotated = annotate_document(&doc, &[it]);
        assert!(annotated.not_found.is_empty());
        assert_eq!(highlighted_texts(&annotated.document), vec!["Governing Law"]);
    }

    #[test]
    fn untouched_runs_stay_byte_identical() {
        let doc = doc_with_paragraphs(&["First paragraph.", "Second paragraph."]);
        let issues = vec![issue(Some("no such text"), "Unlocatable")];

        let annotated = annotate_document(&doc, &issues);

        assert_eq!(annotated.document.paragraphs[0], doc.paragraphs[0]);
        assert_eq!(annotated.document.paragraphs[1], doc.paragraphs[1]);
    }

    #[test]
    fn no_issues_returns_an_identical_document() {
        let doc = doc_with_paragraphs(&["Only paragraph."]);
        let annotated = annotate_document(&doc, &[]);
        assert_eq!(annotated.document, doc);
        assert!(annotated.not_found.is_empty());
    }

    #[test]
    fn two_issues_can_annotate_the_same_run() {
        let doc = doc_with_paragraphs(&["Fill [insert company name] and [insert date] here."]);
        let issues = vec![
            issue(Some("[insert date]"), "Unfilled date"),
            issue(Some("[insert company name]"), "Unfilled company name"),
        ];

        let annotated = annotate_document(&doc, &issues);

        assert!(annotated.not_found.is_empty());
        let mut highlights = highlighted_texts(&annotated.document);
        highlights.sort();
        assert_eq!(highlights, vec!["[insert company name]", "[insert date]"]);
    }

    #[test]
    fn evidence_spanning_run_boundaries_is_not_found() {
        let mut doc = Document::new();
        doc.push(Paragraph {
            kind: ParagraphKind::Body,
            runs: vec![Run::new("Dubai "), Run::new("Courts shall govern.")],
        });
        let issues = vec![issue(Some("Dubai Courts"), "Wrong jurisdiction")];

        let annotated = annotate_document(&doc, &issues);

        assert_eq!(annotated.not_found.len(), 1);
        // The original runs were not modified.
        assert_eq!(annotated.document.paragraphs[0].runs[0].text, "Dubai ");
        assert_eq!(
            annotated.document.paragraphs[0].runs[1].text,
            "Courts shall govern."
        );
    }

    #[test]
    fn later_issue_spanning_an_earlier_split_is_not_found() {
        // After the first splice, "governed by Dubai" spans the split point
        // and becomes invisible to the second issue.
        let doc = doc_with_paragraphs(&["The Company shall be governed by Dubai Courts."]);
        let issues = vec![
            issue(Some("Dubai Courts"), "Wrong jurisdiction"),
            issue(Some("governed by Dubai"), "Vague governing clause"),
        ];

        let annotated = annotate_document(&doc, &issues);

        assert_eq!(highlighted_texts(&annotated.document), vec!["Dubai Courts"]);
        assert_eq!(annotated.not_found.len(), 1);
        assert_eq!(annotated.not_found[0].issue, "Vague governing clause");
    }

    #[test]
    fn first_matching_paragraph_wins() {
        let doc = doc_with_paragraphs(&[
            "Dubai Courts are mentioned here first.",
            "Dubai Courts are mentioned again later.",
        ]);
        let issues = vec![issue(Some("Dubai Courts"), "Wrong jurisdiction")];

        let annotated = annotate_document(&doc, &issues);

        assert!(annotated.document.paragraphs[0]
            .runs
            .iter()
            .any(|r| r.format.highlight));
        assert!(!annotated.document.paragraphs[1]
            .runs
            .iter()
            .any(|r| r.format.highlight));
    }
}
