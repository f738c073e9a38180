//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Note, NoteDraft, NoteId};
use std::future::Future;

/// User-facing category of an oracle failure.
///
/// The category decides which guidance the UI shows and whether a failure on
/// the first oracle call aborts the whole generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// The oracle rejected the credentials
    Authentication,

    /// The oracle is throttling requests
    RateLimited,

    /// The request exceeded the oracle's context window
    PayloadTooLarge,

    /// The oracle could not be reached at all
    Unreachable,

    /// Anything else
    Generic,
}

impl FailureCategory {
    /// Stable machine-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::Authentication => "authentication",
            FailureCategory::RateLimited => "rate_limited",
            FailureCategory::PayloadTooLarge => "payload_too_large",
            FailureCategory::Unreachable => "unreachable",
            FailureCategory::Generic => "generic",
        }
    }

    /// Actionable message for the person who started the run
    pub fn guidance(&self) -> &'static str {
        match self {
            FailureCategory::Authentication => {
                "Please check your API key is correct and has proper permissions"
            }
            FailureCategory::RateLimited => {
                "The language model provider is rate limiting requests; wait a moment and retry"
            }
            FailureCategory::PayloadTooLarge => {
                "The text is too large to process. Please try a smaller file"
            }
            FailureCategory::Unreachable => {
                "The language model provider could not be reached; check the endpoint configuration"
            }
            FailureCategory::Generic => "The language model provider returned an error",
        }
    }

    /// True if this failure on the first oracle call means no later call can succeed
    pub fn aborts_run(&self) -> bool {
        matches!(
            self,
            FailureCategory::Authentication | FailureCategory::Unreachable
        )
    }
}

/// Error raised by an oracle transport
pub trait OracleError: std::error::Error + Send + Sync + 'static {
    /// Classify the failure for the user
    fn category(&self) -> FailureCategory;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (gleaner-llm)
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: OracleError;

    /// Generate a completion constrained to a JSON object
    ///
    /// `system` carries the instructions and output contract, `input` the text
    /// to work on.
    fn generate_structured(
        &self,
        system: &str,
        input: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Name of the model behind this provider
    fn model_name(&self) -> &str;
}

/// Trait for persisting finalized notes
///
/// The pipeline treats storage as a save-and-return-the-saved-record function;
/// identity and timestamps are assigned here.
pub trait NoteStore {
    /// Error type for store operations
    type Error;

    /// Persist a draft under the given project
    fn save(&mut self, project_id: &str, draft: NoteDraft) -> Result<Note, Self::Error>;

    /// Get a note by ID
    fn get(&self, id: NoteId) -> Result<Option<Note>, Self::Error>;

    /// All notes of a project, in save order
    fn list(&self, project_id: &str) -> Result<Vec<Note>, Self::Error>;
}
