pub mod docx;
pub mod extract;
pub mod model;

pub use docx::*;
pub use extract::*;
pub use model::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a DOCX package: {0}")]
    Package(String),

    #[error("Malformed document XML: {0}")]
    Xml(String),

    #[error("Text encoding error: {0}")]
    Encoding(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}
