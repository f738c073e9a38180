//! Drives a whole run: chunk, extract, merge, order, emit

use crate::chunking::TextChunker;
use crate::client::ChunkExtractor;
use crate::config::ExtractorConfig;
use crate::error::GenerationError;
use crate::title::generate_title;
use crate::types::{GenerationEvent, GenerationReport};
use gleaner_domain::{ExtractedNote, NoteDraft, SourceDocument};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Buffered events between the run and its consumer
const EVENT_BUFFER: usize = 16;

/// Generates notes for a document through a [`ChunkExtractor`]
///
/// # Examples
///
/// ```
/// use gleaner_domain::SourceDocument;
/// use gleaner_extractor::{ExtractorConfig, LlmChunkExtractor, NoteGenerator};
/// use gleaner_llm::MockProvider;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let llm = MockProvider::new(r#"{"notes": [{"content": "Rust has no garbage collector"}]}"#);
/// let extractor = LlmChunkExtractor::new(llm, ExtractorConfig::default());
/// let generator = NoteGenerator::new(extractor, ExtractorConfig::default());
///
/// let doc = SourceDocument::new("Rust manages memory through ownership.");
/// let report = generator.generate(&doc, 1, 280).await.unwrap();
/// assert_eq!(report.notes.len(), 1);
/// # }
/// ```
pub struct NoteGenerator<E> {
    extractor: Arc<E>,
    chunker: TextChunker,
    config: ExtractorConfig,
}

impl<E> Clone for NoteGenerator<E> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            chunker: self.chunker.clone(),
            config: self.config.clone(),
        }
    }
}

impl<E> NoteGenerator<E>
where
    E: ChunkExtractor + 'static,
{
    /// Create a new generator
    pub fn new(extractor: E, config: ExtractorConfig) -> Self {
        Self {
            extractor: Arc::new(extractor),
            chunker: TextChunker::from_config(&config),
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Check a request without touching the oracle
    ///
    /// Runs started by [`generate`](Self::generate) and [`stream`](Self::stream)
    /// apply the same checks.
    pub fn validate(&self, doc: &SourceDocument, notes_wanted: usize) -> Result<(), GenerationError> {
        if doc.is_blank() {
            return Err(GenerationError::EmptyDocument);
        }
        if doc.len() > self.config.max_text_length {
            return Err(GenerationError::TextTooLong {
                len: doc.len(),
                max: self.config.max_text_length,
            });
        }
        if notes_wanted == 0 {
            return Err(GenerationError::InvalidRequest(
                "at least one note must be requested".to_string(),
            ));
        }
        Ok(())
    }

    /// Run to completion and return every note at once
    pub async fn generate(
        &self,
        doc: &SourceDocument,
        notes_wanted: usize,
        char_limit: usize,
    ) -> Result<GenerationReport, GenerationError> {
        self.collect(doc, notes_wanted, char_limit, || false).await
    }

    /// Run on the tokio runtime and deliver notes as events
    ///
    /// The receiver yields one [`GenerationEvent::Note`] per note in source
    /// order followed by exactly one terminal event. Dropping the receiver
    /// abandons the run before its next oracle call.
    pub fn stream(
        &self,
        doc: SourceDocument,
        notes_wanted: usize,
        char_limit: usize,
    ) -> mpsc::Receiver<GenerationEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let generator = self.clone();

        tokio::spawn(async move {
            generator.emit(doc, notes_wanted, char_limit, tx).await;
        });

        rx
    }

    async fn emit(
        &self,
        doc: SourceDocument,
        notes_wanted: usize,
        char_limit: usize,
        tx: mpsc::Sender<GenerationEvent>,
    ) {
        let outcome = self
            .collect(&doc, notes_wanted, char_limit, || tx.is_closed())
            .await;

        if tx.is_closed() {
            debug!("Consumer went away, abandoning run");
            return;
        }

        let report = match outcome {
            Ok(report) => report,
            Err(e) => {
                let _ = tx.send(GenerationEvent::Failed(e)).await;
                return;
            }
        };

        let total = report.notes.len();
        let delay = self.config.emit_delay();
        for (idx, note) in report.notes.into_iter().enumerate() {
            if idx > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if tx.send(GenerationEvent::Note(note)).await.is_err() {
                debug!(delivered = idx, "Consumer went away mid-stream");
                return;
            }
        }

        let _ = tx.send(GenerationEvent::Done { total }).await;
    }

    async fn collect<F>(
        &self,
        doc: &SourceDocument,
        notes_wanted: usize,
        char_limit: usize,
        is_cancelled: F,
    ) -> Result<GenerationReport, GenerationError>
    where
        F: Fn() -> bool,
    {
        self.validate(doc, notes_wanted)?;

        let chunks = self.chunker.chunk(doc.text());
        let per_chunk = notes_wanted.div_ceil(chunks.len()).max(1);

        info!(
            chars = doc.len(),
            chunks = chunks.len(),
            notes_wanted,
            per_chunk,
            "Starting note generation"
        );

        let mut notes: Vec<ExtractedNote> = Vec::new();
        let mut last_failure = None;
        let mut queried = 0;
        let mut failed = 0;

        for (idx, chunk) in chunks.iter().enumerate() {
            if is_cancelled() {
                debug!(chunk = idx + 1, "Run cancelled before chunk");
                break;
            }

            queried += 1;
            debug!(chunk = idx + 1, of = chunks.len(), "Processing chunk");

            match self.extractor.extract(chunk, per_chunk, char_limit).await {
                Ok(found) => {
                    debug!(chunk = idx + 1, found = found.len(), "Chunk extracted");
                    notes.extend(found);
                }
                Err(e) => {
                    let category = e.category();
                    if idx == 0 && category.aborts_run() {
                        warn!(error = %e, category = category.as_str(), "First oracle call failed, aborting run");
                        return Err(GenerationError::Oracle {
                            category,
                            message: e.to_string(),
                        });
                    }
                    warn!(chunk = idx + 1, error = %e, "Chunk extraction failed, continuing");
                    failed += 1;
                    last_failure = Some(category);
                }
            }

            if notes.len() >= notes_wanted {
                debug!(chunk = idx + 1, "Note target reached");
                break;
            }
        }

        if notes.is_empty() {
            warn!(chunks = chunks.len(), "No notes generated");
            return Err(GenerationError::NoNotesGenerated {
                chunks: chunks.len(),
                cause: last_failure,
            });
        }

        notes.truncate(notes_wanted);
        // Stable: equal starts keep the order the oracle returned them in
        notes.sort_by_key(ExtractedNote::sort_key);

        let notes: Vec<NoteDraft> = notes.into_iter().map(finalize).collect();

        info!(
            notes = notes.len(),
            chunks_queried = queried,
            chunks_failed = failed,
            "Note generation complete"
        );

        Ok(GenerationReport {
            notes,
            chunks_total: chunks.len(),
            chunks_queried: queried,
            chunks_failed: failed,
        })
    }
}

fn finalize(mut note: ExtractedNote) -> NoteDraft {
    let title = note
        .title
        .take()
        .unwrap_or_else(|| generate_title(&note.content));
    NoteDraft::from_extracted(note, title)
}
