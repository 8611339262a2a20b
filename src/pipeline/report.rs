//! Uniform issue records and the cross-document summary report.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::jurisdiction::Finding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Parse a collaborator-provided label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// One compliance issue, tagged with its source document.
///
/// Created by a checker or the jurisdiction detector; consumed exactly once
/// by the annotator (in-place annotation or the not-found section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub document: String,
    pub issue: String,
    pub severity: Severity,
    pub suggestion: String,
    /// Literal text expected to appear in the source document as evidence.
    pub snippet: Option<String>,
    /// Section/category label, used as fallback evidence when there is no
    /// snippet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Final structured report across all reviewed documents.
///
/// Field names are the report's wire contract; serialized as pretty-printed
/// UTF-8 JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub process: Option<String>,
    pub documents_uploaded: usize,
    pub required_documents: usize,
    pub missing_document: Vec<String>,
    pub issues_found: Vec<Issue>,
}

impl SummaryReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = self.to_pretty_json()?;
        std::fs::write(path, json)
    }
}

/// Merge one document's raw findings into uniform issue records.
///
/// Ordering: placeholders first, then missing clauses, then jurisdiction
/// findings, each in their sub-list's original order. Rule-based findings
/// default to severity High with the matched/missing literal as snippet;
/// model findings keep their own severity (Medium when absent).
pub fn aggregate_issues(
    document: &str,
    placeholders: &[String],
    missing_clauses: &[String],
    findings: &[Finding],
) -> Vec<Issue> {
    let mut issues = Vec::with_capacity(placeholders.len() + missing_clauses.len() + findings.len());

    for placeholder in placeholders {
        issues.push(Issue {
            document: document.to_string(),
            issue: format!("Unfilled placeholder: {placeholder}"),
            severity: Severity::High,
            suggestion: "Fill this placeholder with the correct value".to_string(),
            snippet: Some(placeholder.clone()),
            section: None,
        });
    }

    for clause in missing_clauses {
        issues.push(Issue {
            document: document.to_string(),
            issue: format!("Missing clause: {clause}"),
            severity: Severity::High,
            suggestion: "Add the missing clause to match ADGM requirements".to_string(),
            snippet: Some(clause.clone()),
            section: None,
        });
    }

    for finding in findings {
        let severity = finding
            .severity
            .as_deref()
            .and_then(Severity::from_label)
            .unwrap_or(Severity::Medium);

        issues.push(Issue {
            document: document.to_string(),
            issue: finding.issue.clone(),
            severity,
            suggestion: finding
                .suggestion
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            snippet: finding.snippet.clone(),
            section: finding.section.clone(),
        });
    }

    issues
}
