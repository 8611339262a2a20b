//! Wrong-jurisdiction detection via an external text-classification model.
//!
//! The detector itself returns a `Result` so callers can tell "no findings"
//! apart from "the check failed"; the pipeline uses [`JurisdictionDetector::detect_or_empty`],
//! which degrades failures to an empty finding list so one broken check
//! never aborts a document. No retries are performed.

use serde::Deserialize;

use super::ollama::LlmClient;
use super::prompt::{build_jurisdiction_prompt, JURISDICTION_SYSTEM_PROMPT};
use super::JurisdictionError;

/// One structured finding from the collaborator.
///
/// Only `issue` is required; everything else defaults downstream
/// (severity → Medium, suggestion → "N/A").
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Finding {
    pub issue: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
    /// Exact quoted span expected to appear in the source document.
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

pub struct JurisdictionDetector {
    client: Box<dyn LlmClient>,
    model: String,
    expected_jurisdiction: String,
    common_wrong: Vec<String>,
}

impl JurisdictionDetector {
    pub fn new(
        client: Box<dyn LlmClient>,
        model: impl Into<String>,
        expected_jurisdiction: impl Into<String>,
        common_wrong: Vec<String>,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            expected_jurisdiction: expected_jurisdiction.into(),
            common_wrong,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run the check. Errors here mean the collaborator failed or answered
    /// with something that is not a findings array.
    pub fn detect(&self, doc_text: &str, doc_name: &str) -> Result<Vec<Finding>, JurisdictionError> {
        let prompt = build_jurisdiction_prompt(
            doc_text,
            doc_name,
            &self.expected_jurisdiction,
            &self.common_wrong,
        );

        let response = self
            .client
            .generate(&self.model, &prompt, JURISDICTION_SYSTEM_PROMPT)?;

        parse_findings(&response)
    }

    /// Fail-open variant used by the pipeline: failures log a warning and
    /// yield zero findings.
    pub fn detect_or_empty(&self, doc_text: &str, doc_name: &str) -> Vec<Finding> {
        match self.detect(doc_text, doc_name) {
            Ok(findings) => findings,
            Err(e) => {
                tracing::warn!(
                    document = %doc_name,
                    model = %self.model,
                    error = %e,
                    "Jurisdiction check failed; continuing with zero findings"
                );
                Vec::new()
            }
        }
    }
}

/// Parse the collaborator's response as a strict JSON array of findings.
///
/// Tolerates a fenced code block or surrounding prose around the array, and
/// skips individual items that do not match the finding shape; anything
/// without a well-formed array at all is an error.
pub fn parse_findings(response: &str) -> Result<Vec<Finding>, JurisdictionError> {
    let candidate = extract_array_slice(response)
        .ok_or_else(|| JurisdictionError::MalformedResponse("No JSON array found".into()))?;

    let values: Vec<serde_json::Value> = serde_json::from_str(candidate)
        .map_err(|e| JurisdictionError::JsonParsing(e.to_string()))?;

    // Lenient per-item decode: malformed entries are dropped, not fatal.
    Ok(values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

/// Slice out the outermost `[...]` from the response, stripping code fences.
fn extract_array_slice(response: &str) -> Option<&str> {
    let body = match response.find("```") {
        Some(open) => {
            let after = &response[open + 3..];
            let after = after.strip_prefix("json").unwrap_or(after);
            match after.find("```") {
                Some(close) => &after[..close],
                None => after,
            }
        }
        None => response,
    };

    let start = body.find('[')?;
    let end = body.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&body[start..=end])
}
