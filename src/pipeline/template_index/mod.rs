pub mod embedder;
pub mod store;

pub use embedder::*;
pub use store::*;

use thiserror::Error;

use crate::document::DocumentError;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Embedding service is not reachable at {0}")]
    Connection(String),

    #[error("Embedding service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Template library at {0} contains no readable templates")]
    EmptyLibrary(String),
}
