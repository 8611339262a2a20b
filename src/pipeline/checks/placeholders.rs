use super::rules::RuleBook;

/// Find unfilled placeholders in extracted text.
///
/// Returns every matched literal substring, in pattern order then occurrence
/// order, duplicates included. A document type with no registered patterns
/// produces no findings — that is not an error.
pub fn check_placeholders(text: &str, doc_type: &str, rules: &RuleBook) -> Vec<String> {
    let mut unfilled = Vec::new();
    for pattern in rules.placeholder_patterns(doc_type) {
        for found in pattern.find_iter(text) {
            unfilled.push(found.as_str().to_string());
        }
    }
    unfilled
}
