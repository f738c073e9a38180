//! Error types for note generation

use gleaner_domain::traits::{FailureCategory, OracleError};
use gleaner_llm::LlmError;
use thiserror::Error;

/// Failure to obtain notes for a single chunk
///
/// These never end a run on their own; the generator logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// The oracle call failed
    #[error(transparent)]
    Oracle(#[from] LlmError),

    /// The oracle did not answer within the configured timeout
    #[error("Extraction timed out after {0}s")]
    Timeout(u64),

    /// The reply was not a JSON object
    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),

    /// The reply had no `notes` array
    #[error("Oracle response has no notes array")]
    MissingNotes,
}

impl ExtractionError {
    /// User-facing category of this failure
    pub fn category(&self) -> FailureCategory {
        match self {
            ExtractionError::Oracle(e) => e.category(),
            ExtractionError::Timeout(_)
            | ExtractionError::MalformedResponse(_)
            | ExtractionError::MissingNotes => FailureCategory::Generic,
        }
    }
}

impl From<serde_json::Error> for ExtractionError {
    fn from(e: serde_json::Error) -> Self {
        ExtractionError::MalformedResponse(e.to_string())
    }
}

/// Failure of a whole generation run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Nothing to extract from
    #[error("Text is required")]
    EmptyDocument,

    /// Document exceeds the configured maximum
    #[error("Text too long: {len} chars (max: {max})")]
    TextTooLong {
        /// Document length in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Request parameters out of range
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Every chunk came back empty or failed
    #[error("No notes could be generated from {chunks} chunk(s)")]
    NoNotesGenerated {
        /// Number of chunks the document was split into
        chunks: usize,
        /// Category of the last chunk failure, if any chunk failed
        cause: Option<FailureCategory>,
    },

    /// The oracle rejected the very first call in a way no later call can recover from
    #[error("{message}")]
    Oracle {
        /// Failure category
        category: FailureCategory,
        /// Provider message
        message: String,
    },
}

impl GenerationError {
    /// Oracle failure category behind this error, if any
    pub fn category(&self) -> Option<FailureCategory> {
        match self {
            GenerationError::NoNotesGenerated { cause, .. } => *cause,
            GenerationError::Oracle { category, .. } => Some(*category),
            _ => None,
        }
    }

    /// True for errors caused by the request rather than the oracle
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GenerationError::EmptyDocument
                | GenerationError::TextTooLong { .. }
                | GenerationError::InvalidRequest(_)
        )
    }
}
