//! Error types for the pensia-core library.

use thiserror::Error;

/// Main error type for the pensia library.
#[derive(Error, Debug)]
pub enum PensiaError {
    /// Document parsing error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while parsing a disclosure document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The markup is not well formed.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// Character data could not be decoded.
    #[error("invalid encoding: {0}")]
    Encoding(String),

    /// The document contains no root element.
    #[error("document has no root element")]
    NoRoot,
}

/// Result type for the pensia library.
pub type Result<T> = std::result::Result<T, PensiaError>;
