//! Static process checklists: which document types a named business process
//! requires. Read-only throughout a session.

/// Ordered table of (process name, required document identifiers).
///
/// Order matters: process detection reports the first process with at least
/// one uploaded match.
pub const PROCESS_CHECKLISTS: &[(&str, &[&str])] = &[
    (
        "Company Formation & Governance",
        &[
            "General Incorporation Form.docx",
            "adgm-ra-resolution-incorporation-ltd-multiple-ind-shareholder-ver-1-1-20191231.docx",
            "adgm-ra-resolution-incorporation-ltd-sole-shareholder-ver-3-0-20170202.docx",
            "adgm-ra-resolution-incorporation-ltg-multiple-ind-founding-members-ver-3-2-20191231.docx",
            "adgm-ra-resolution-multiple-incorporate-shareholders-LTD-incorporation-v2.docx",
            "adgm-ra-resolution-registration-branch-ver-2-1-20191105.docx",
        ],
    ),
    (
        "Company Formation (Specific Case)",
        &["adgm-ra-resolution-multiple-incorporate-shareholders-LTD-incorporation-v2"],
    ),
    (
        "Company Formation & Compliance",
        &[
            "Incorporation Forms",
            "SPV, LLC Registration Templates",
            "Other Forms & Templates",
        ],
    ),
    ("Policy & Guidance", &["Guidance Notes", "Policy Statements"]),
    (
        "ADGM Company Set-up Checklists",
        &[
            "Checklist Company Set-up (Various Entities)",
            "Checklist Private Company Limited by Guarantee",
        ],
    ),
    (
        "Employment & HR",
        &[
            "Standard Employment Contract Template (2024 update)",
            "Standard Employment Contract Template (2019 short version)",
        ],
    ),
    ("Data Protection", &["Appropriate Policy Document Template"]),
    ("Compliance & Filings", &["Annual Accounts & Filings"]),
    ("Letters/Permits", &["Application for Official Letters & Permits"]),
    (
        "Regulatory Guidance & Templates",
        &[
            "Incorporation Package, Filings, Templates",
            "Shareholder Resolution - Amendment of Articles",
        ],
    ),
];

/// A detected process and its checklist reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMatch {
    pub process: String,
    /// Uploaded document types that appear on the checklist.
    pub matched: usize,
    /// Total required document count for the checklist.
    pub required: usize,
    /// Required document identifiers with no uploaded counterpart, in
    /// checklist order.
    pub missing: Vec<String>,
}

/// Cross-reference uploaded document types against the checklist table and
/// report the first process with any match. No uploads (or no overlap with
/// any checklist) yields `None`.
pub fn detect_process(uploaded_doc_types: &[String]) -> Option<ProcessMatch> {
    for (process, required_docs) in PROCESS_CHECKLISTS {
        let matched = required_docs
            .iter()
            .filter(|d| uploaded_doc_types.iter().any(|u| u == *d))
            .count();
        if matched > 0 {
            return Some(ProcessMatch {
                process: process.to_string(),
                matched,
                required: required_docs.len(),
                missing: required_docs
                    .iter()
                    .filter(|d| !uploaded_doc_types.iter().any(|u| u == *d))
                    .map(|d| d.to_string())
                    .collect(),
            });
        }
    }
    None
}
