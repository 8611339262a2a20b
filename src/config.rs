//! Review configuration and service defaults.

use crate::pipeline::jurisdiction::{DEFAULT_EXPECTED_JURISDICTION, DEFAULT_WRONG_JURISDICTIONS};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_LLM_MODEL: &str = "llama3.1";
pub const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// Tunable review behavior, fixed for the lifetime of a pipeline.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub expected_jurisdiction: String,
    pub common_wrong_jurisdictions: Vec<String>,
    /// Optional cosine-similarity floor for classification. `None` keeps the
    /// top-1 match unconditionally.
    pub min_similarity: Option<f32>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            expected_jurisdiction: DEFAULT_EXPECTED_JURISDICTION.to_string(),
            common_wrong_jurisdictions: DEFAULT_WRONG_JURISDICTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_similarity: None,
        }
    }
}

/// Default `RUST_LOG`-style filter when the environment sets none.
pub fn default_log_filter() -> &'static str {
    "info,clausecheck=debug"
}
