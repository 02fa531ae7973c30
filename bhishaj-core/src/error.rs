//! Error types for bhishaj

use thiserror::Error;

/// The main error type for bhishaj operations
///
/// Chat store operations never fail; they treat invalid input as a no-op.
/// Errors come from the ambient layers: configuration, I/O and the media
/// collaborator.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Media acquisition errors (picker failures, unreadable files)
    #[error("Media error: {0}")]
    Media(String),
}

/// A specialized Result type for bhishaj operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
