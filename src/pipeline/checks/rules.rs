//! Rule book: placeholder patterns and mandatory clauses keyed by document
//! type (template title). Constructed explicitly and passed by reference
//! into the pipeline; document types with no registered rules simply
//! produce no findings.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

pub const ADGM_SOLE_SHAREHOLDER_RESOLUTION: &str =
    "adgm-ra-resolution-incorporation-ltd-sole-shareholder-ver-3-0-20170202.docx";

#[derive(Debug, Default)]
pub struct RuleBook {
    placeholders: HashMap<String, Vec<Regex>>,
    clauses: HashMap<String, Vec<String>>,
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in ADGM rule set.
    pub fn adgm_defaults() -> &'static RuleBook {
        &ADGM_RULES
    }

    pub fn with_placeholders(
        mut self,
        doc_type: &str,
        patterns: impl IntoIterator<Item = Regex>,
    ) -> Self {
        self.placeholders
            .entry(doc_type.to_string())
            .or_default()
            .extend(patterns);
        self
    }

    pub fn with_clauses(
        mut self,
        doc_type: &str,
        clauses: impl IntoIterator<Item = String>,
    ) -> Self {
        self.clauses
            .entry(doc_type.to_string())
            .or_default()
            .extend(clauses);
        self
    }

    /// Placeholder patterns registered for a document type; empty when none.
    pub fn placeholder_patterns(&self, doc_type: &str) -> &[Regex] {
        self.placeholders.get(doc_type).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mandatory clauses registered for a document type, in configured order.
    pub fn mandatory_clauses(&self, doc_type: &str) -> &[String] {
        self.clauses.get(doc_type).map(Vec::as_slice).unwrap_or(&[])
    }
}

static ADGM_RULES: LazyLock<RuleBook> = LazyLock::new(|| {
    // Case-insensitive with flexible spacing, so "[ Insert Company Name ]"
    // still counts as unfilled.
    let placeholder = |body: &str| {
        Regex::new(&format!(r"(?i)\[\s*{body}\s*\]")).expect("static placeholder pattern")
    };

    RuleBook::new()
        .with_placeholders(
            ADGM_SOLE_SHAREHOLDER_RESOLUTION,
            [
                placeholder(r"insert\s+company\s+name"),
                placeholder(r"insert\s+date"),
                placeholder(r"insert\s+name\s+of\s+shareholder"),
                placeholder(r"insert\s+name\s+of\s+authorised\s+signatories"),
                placeholder(r"insert\s+name\s+of\s+directors"),
            ],
        )
        .with_clauses(
            ADGM_SOLE_SHAREHOLDER_RESOLUTION,
            [
                "RESOLVED, that the Company be incorporated in the Abu Dhabi Global Market"
                    .to_string(),
                "hereby appointed and authorised to singly execute all documents and take all \
                 necessary and appropriate actions on behalf of the incorporating shareholder \
                 to incorporate the Company and is hereby appointed and authorised to execute \
                 all documents and take all necessary appropriate actions on behalf of the \
                 incorporating shareholder following incorporation."
                    .to_string(),
                "hereby appointed as director of the Company.".to_string(),
                "RESOLVED, that the Company duly adopts proposed Articles of Association for \
                 the purpose of incorporation of the Company in the Abu Dhabi Global Market."
                    .to_string(),
            ],
        )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adgm_defaults_cover_the_sole_shareholder_resolution() {
        let rules = RuleBook::adgm_defaults();
        assert_eq!(
            rules.placeholder_patterns(ADGM_SOLE_SHAREHOLDER_RESOLUTION).len(),
            5
        );
        assert_eq!(
            rules.mandatory_clauses(ADGM_SOLE_SHAREHOLDER_RESOLUTION).len(),
            4
        );
    }

    #[test]
    fn unknown_document_type_has_no_rules() {
        let rules = RuleBook::adgm_defaults();
        assert!(rules.placeholder_patterns("unknown.docx").is_empty());
        assert!(rules.mandatory_clauses("unknown.docx").is_empty());
    }
}
