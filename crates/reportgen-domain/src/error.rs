//! Domain error types.

use thiserror::Error;

use crate::notice::Notice;

/// Domain-level errors.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Another operation of the same kind is still in flight.
    #[error("{0} already in progress")]
    Busy(&'static str),

    /// No credential has been provided, so no bridge exists.
    #[error("no AI credential configured")]
    NoCredential,

    /// The AI bridge failed. Detail has already been logged.
    #[error(transparent)]
    Bridge(#[from] reportgen_llm::BridgeError),

    /// A dropped or selected file is not an image or PDF.
    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),

    /// Reading an uploaded or imported file failed.
    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// Writing an exported file failed.
    #[error("failed to write '{path}': {source}")]
    FileWrite {
        path: String,
        source: std::io::Error,
    },

    /// An import payload failed to parse or validate.
    #[error("invalid report data: {0}")]
    InvalidImport(String),

    /// Serializing the report failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A list edit addressed a missing element or the wrong record kind.
    #[error("invalid edit: {0}")]
    InvalidEdit(String),

    /// Configuration or credential error.
    #[error("configuration error: {0}")]
    Config(#[from] reportgen_config::ConfigError),
}

impl DomainError {
    /// True for the "already running" condition, which callers ignore.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }

    /// End-user notice for an analysis failure.
    pub fn analysis_notice(&self) -> Option<Notice> {
        match self {
            Self::Busy(_) => None,
            _ => Some(Notice::AnalysisFailed),
        }
    }

    /// End-user notice for a document-analysis failure.
    pub fn document_notice(&self) -> Option<Notice> {
        match self {
            Self::Busy(_) => None,
            Self::UnsupportedFile(_) => Some(Notice::UnsupportedFile),
            _ => Some(Notice::FileAnalysisFailed),
        }
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
