//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Existence and validation failures surface through the derived sync
/// status rather than crossing the host boundary as panics. Mutation
/// input errors (bad name, bad picture encoding) are returned
/// synchronously from the edit service before any state changes.
#[derive(Error, Debug)]
pub enum Error {
    /// The store confirmed the account document does not exist.
    /// The message is a stable identifier shown to the user as-is.
    #[error("profile.json not found")]
    DocumentNotFound,

    /// Raw data exists in the store but fails schema validation.
    #[error("invalid account document: {0}")]
    InvalidDocument(String),

    /// A picture upload used an encoding other than JPEG.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// A write-back to the store was rejected or errored.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// A mutation intent carried invalid input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mutation was requested before the first successful validation.
    #[error("account document not loaded")]
    NotLoaded,

    /// The store client failed to answer an observation.
    #[error("store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid document error
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create an unsupported media type error
    pub fn unsupported_media(msg: impl Into<String>) -> Self {
        Self::UnsupportedMediaType(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_stable() {
        assert_eq!(Error::DocumentNotFound.to_string(), "profile.json not found");
    }

    #[test]
    fn test_invalid_document_message() {
        let err = Error::invalid_document("user name cannot be empty");
        assert_eq!(
            err.to_string(),
            "invalid account document: user name cannot be empty"
        );
    }
}
