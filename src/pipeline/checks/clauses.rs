use super::rules::RuleBook;

/// Find mandatory clauses missing from extracted text.
///
/// Each registered clause is tested for case-insensitive containment in the
/// full document text; the returned list is exactly the configured clause
/// set minus the clauses present, order preserved.
pub fn check_missing_clauses(text: &str, doc_type: &str, rules: &RuleBook) -> Vec<String> {
    let haystack = text.to_lowercase();
    rules
        .mandatory_clauses(doc_type)
        .iter()
        .filter(|clause| !haystack.contains(&clause.to_lowercase()))
        .cloned()
        .collect()
}
