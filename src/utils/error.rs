use thiserror::Error;

/// Message surfaced to callers whenever the input cannot be turned into a record.
pub const NOT_A_PASSPORT_MRZ: &str = "Input does not represent a valid passport MRZ.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PassportError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unparseable document: {0}")]
    UnparseableDocument(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("MRZ detection error: {0}")]
    MrzDetectionError(String),
    #[error("MRZ parsing error: {0}")]
    MrzParsingError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PassportError {
    /// The uniform caller-facing failure for documents that are not a passport MRZ.
    pub fn not_a_passport() -> Self {
        PassportError::UnparseableDocument(NOT_A_PASSPORT_MRZ.to_string())
    }
}

impl From<std::io::Error> for PassportError {
    fn from(err: std::io::Error) -> Self {
        PassportError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for PassportError {
    fn from(err: serde_json::Error) -> Self {
        PassportError::SerializationError(err.to_string())
    }
}
