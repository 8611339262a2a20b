pub mod detector;
pub mod ollama;
pub mod prompt;

pub use detector::*;
pub use ollama::*;
pub use prompt::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JurisdictionError {
    #[error("Ollama is not running at {0}")]
    Connection(String),

    #[error("Ollama returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed findings response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),
}
