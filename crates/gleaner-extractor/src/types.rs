//! Result and event types for generation runs

use crate::error::GenerationError;
use gleaner_domain::NoteDraft;

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Notes in source order, at most the number requested
    pub notes: Vec<NoteDraft>,

    /// Chunks the document was split into
    pub chunks_total: usize,

    /// Chunks the oracle was actually asked about
    pub chunks_queried: usize,

    /// Queried chunks whose extraction failed
    pub chunks_failed: usize,
}

impl GenerationReport {
    /// True if some chunk failed but the run still produced notes
    pub fn is_partial(&self) -> bool {
        self.chunks_failed > 0
    }
}

/// One message of an incremental run
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// The next note, in source order
    Note(NoteDraft),

    /// All notes were delivered
    Done {
        /// Number of notes delivered
        total: usize,
    },

    /// The run ended without notes
    Failed(GenerationError),
}

impl GenerationEvent {
    /// True for `Done` and `Failed`
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GenerationEvent::Note(_))
    }
}
