//! Gleaner Extractor
//!
//! Distills source text into a bounded set of short notes using an LLM.
//!
//! # Overview
//!
//! Long documents are cut into oracle-sized chunks, each chunk is sent to the
//! language model with an explicit JSON contract, and the resulting notes are
//! merged, ordered by where they occur in the source, titled and emitted.
//!
//! # Architecture
//!
//! ```text
//! Text → TextChunker → ChunkExtractor (LLM) → NoteGenerator → NoteDraft stream
//! ```
//!
//! # Key Features
//!
//! - **Boundary-aware chunking**: windows end on paragraph or sentence breaks
//! - **Document-relative offsets**: chunk-relative positions are shifted on arrival
//! - **Fault tolerance**: a failing chunk is logged and skipped
//! - **Early stop**: no chunk is queried once enough notes are collected
//! - **Streaming**: notes are delivered as events and the run stops when the consumer leaves
//!
//! # Example Usage
//!
//! ```no_run
//! use gleaner_domain::SourceDocument;
//! use gleaner_extractor::{ExtractorConfig, GenerationEvent, LlmChunkExtractor, NoteGenerator};
//! use gleaner_llm::OllamaProvider;
//!
//! # async fn example() {
//! let config = ExtractorConfig::default();
//! let extractor = LlmChunkExtractor::new(OllamaProvider::default_endpoint("llama3"), config.clone());
//! let generator = NoteGenerator::new(extractor, config);
//!
//! let doc = SourceDocument::new(std::fs::read_to_string("article.txt").unwrap());
//! let mut events = generator.stream(doc, 5, 280);
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         GenerationEvent::Note(note) => println!("{}: {}", note.title, note.content),
//!         GenerationEvent::Done { total } => println!("{} notes", total),
//!         GenerationEvent::Failed(e) => eprintln!("failed: {}", e),
//!     }
//! }
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod client;
mod config;
mod error;
mod generator;
mod parser;
mod prompt;
mod store;
mod title;
mod types;


pub use chunking::TextChunker;
pub use client::{to_document_offsets, ChunkExtractor, LlmChunkExtractor};
pub use config::ExtractorConfig;
pub use error::{ExtractionError, GenerationError};
pub use generator::NoteGenerator;
pub use parser::{parse_notes, MAX_TAGS};
pub use prompt::PromptBuilder;
pub use store::{InMemoryNoteStore, StoreError};
pub use title::generate_title;
pub use types::{GenerationEvent, GenerationReport};
