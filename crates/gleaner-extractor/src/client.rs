//! One oracle call per chunk

use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::parser::parse_notes;
use crate::prompt::PromptBuilder;
use gleaner_domain::traits::LlmProvider;
use gleaner_domain::{Chunk, ExtractedNote};
use gleaner_llm::LlmError;
use std::future::Future;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::debug;

/// Turns one chunk into notes with document-relative positions
///
/// This is the seam the generator is driven through; tests substitute a
/// scripted implementation.
pub trait ChunkExtractor: Send + Sync {
    /// Ask for `notes_wanted` notes of at most `char_limit` characters each
    fn extract(
        &self,
        chunk: &Chunk,
        notes_wanted: usize,
        char_limit: usize,
    ) -> impl Future<Output = Result<Vec<ExtractedNote>, ExtractionError>> + Send;
}

/// [`ChunkExtractor`] backed by a language model provider
pub struct LlmChunkExtractor<L> {
    llm: Arc<L>,
    config: ExtractorConfig,
}

impl<L> LlmChunkExtractor<L>
where
    L: LlmProvider<Error = LlmError>,
{
    /// Create a new extractor around a provider
    pub fn new(llm: L, config: ExtractorConfig) -> Self {
        Self::from_shared(Arc::new(llm), config)
    }

    /// Create a new extractor around a provider shared with other owners
    pub fn from_shared(llm: Arc<L>, config: ExtractorConfig) -> Self {
        Self { llm, config }
    }

    /// Name of the model behind the provider
    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }
}

impl<L> ChunkExtractor for LlmChunkExtractor<L>
where
    L: LlmProvider<Error = LlmError>,
{
    async fn extract(
        &self,
        chunk: &Chunk,
        notes_wanted: usize,
        char_limit: usize,
    ) -> Result<Vec<ExtractedNote>, ExtractionError> {
        let char_limit = self.config.clamp_char_limit(char_limit);
        let system = PromptBuilder::new(notes_wanted, char_limit).build();

        debug!(
            base_offset = chunk.base_offset,
            chars = chunk.char_len(),
            notes_wanted,
            char_limit,
            "Requesting notes for chunk"
        );

        let response = timeout(
            self.config.extraction_timeout(),
            self.llm.generate_structured(&system, &chunk.text),
        )
        .await
        .map_err(|_| ExtractionError::Timeout(self.config.extraction_timeout_secs))??;

        let notes = parse_notes(&response)?;
        debug!(count = notes.len(), "Parsed notes for chunk");

        Ok(notes
            .into_iter()
            .map(|note| to_document_offsets(note, chunk.base_offset))
            .collect())
    }
}

/// Shift a chunk-relative position by the chunk's base offset
pub fn to_document_offsets(mut note: ExtractedNote, base_offset: usize) -> ExtractedNote {
    note.text_position = note.text_position.map(|p| p.shifted(base_offset));
    note
}
