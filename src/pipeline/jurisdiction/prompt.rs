pub const JURISDICTION_SYSTEM_PROMPT: &str = r#"
You are a compliance checker for legal documents. Your ONLY role is to flag
clauses whose governing jurisdiction differs from the expected jurisdiction.

RULES:
1. Flag only text that names a jurisdiction other than the expected one.
2. If no jurisdiction is mentioned at all, do not flag anything.
3. Quote the offending text exactly as it appears in the document.
4. Output MUST be a strict JSON array and nothing else.
"#;

pub const DEFAULT_EXPECTED_JURISDICTION: &str = "Abu Dhabi Global Market (ADGM) Courts";

pub const DEFAULT_WRONG_JURISDICTIONS: &[&str] = &[
    "UAE Federal Courts",
    "Dubai Courts",
    "Abu Dhabi Judicial Department",
    "DIFC Courts",
];

/// Build the jurisdiction-check prompt for a single document.
pub fn build_jurisdiction_prompt(
    doc_text: &str,
    doc_name: &str,
    expected_jurisdiction: &str,
    common_wrong: &[String],
) -> String {
    format!(
        r#"Document: {doc_name}

Expected Jurisdiction: "{expected_jurisdiction}"
Common Wrong Jurisdictions: {wrong}

Task:
- Read the document text carefully.
- Flag any clause or part of the text that mentions a jurisdiction other than the expected one.
- If no jurisdiction is mentioned, do not flag.
- Return results strictly as a JSON array:
  [
    {{
      "issue": "Wrong jurisdiction found: '<exact text>'",
      "severity": "High",
      "suggestion": "Replace with '{expected_jurisdiction}'.",
      "snippet": "<exact text as it appears in the document>"
    }}
  ]
- If no wrong jurisdiction is found, return an empty list [].

Document text:
{doc_text}
"#,
        wrong = common_wrong.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_document_and_jurisdictions() {
        let wrong: Vec<String> = DEFAULT_WRONG_JURISDICTIONS
            .iter()
            .map(|s| s.to_string())
            .collect();
        let prompt = build_jurisdiction_prompt(
            "The Company shall be governed by Dubai Courts.",
            "resolution.docx",
            DEFAULT_EXPECTED_JURISDICTION,
            &wrong,
        );

        assert!(prompt.contains("Document: resolution.docx"));
        assert!(prompt.contains("Abu Dhabi Global Market (ADGM) Courts"));
        assert!(prompt.contains("Dubai Courts, Abu Dhabi Judicial Department"));
        assert!(prompt.contains("The Company shall be governed by Dubai Courts."));
    }
}
