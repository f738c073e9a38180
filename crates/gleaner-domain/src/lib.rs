//! Gleaner Domain Layer
//!
//! This crate contains the value types shared by every layer of Gleaner and the
//! trait seams behind which external collaborators live. Apart from `uuid` it
//! has no external dependencies.
//!
//! ## Key Concepts
//!
//! - **SourceDocument**: the immutable text a project's notes point into
//! - **Chunk**: a model-sized window of a document with its absolute offset
//! - **ExtractedNote**: what the extraction oracle returns for one note
//! - **NoteDraft**: an extracted note that has been ordered and titled
//! - **Note**: a draft after the persistence collaborator assigned identity
//!
//! All offsets are character offsets (Unicode scalar values), never bytes.
//!
//! ## Architecture
//!
//! - Pure data and behavior only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod note;
pub mod sentiment;
pub mod traits;

// Re-exports for convenience
pub use document::{Chunk, SourceDocument};
pub use note::{ExtractedNote, Note, NoteDraft, NoteId, TextPosition};
pub use sentiment::Sentiment;
