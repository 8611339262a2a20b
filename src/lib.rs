//! Automated compliance review for ADGM corporate documents.
//!
//! Takes uploaded `.docx` files, classifies each against a template library
//! by embedding similarity, runs rule-based and model-based compliance
//! checks, writes back an annotated `reviewed_<name>.docx` copy, and emits a
//! structured JSON summary report.

pub mod config;
pub mod document;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`, falling back to the crate default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
