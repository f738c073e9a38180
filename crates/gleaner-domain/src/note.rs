//! Notes - the unit Gleaner distills a document into

use crate::Sentiment;
use std::fmt;

/// Unique identifier for a note based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, which matches the order
/// in which notes are saved during a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(u128);

impl NoteId {
    /// Generate a new UUIDv7-based NoteId
    ///
    /// # Examples
    ///
    /// ```
    /// use gleaner_domain::NoteId;
    ///
    /// let id = NoteId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a NoteId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a NoteId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use gleaner_domain::NoteId;
    ///
    /// let id = NoteId::new();
    /// let parsed = NoteId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid note id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A `[start, end)` pair of character offsets into a source text.
///
/// Positions come from the oracle and are not trusted: `start > end` or an
/// `end` past the document are representable and must be tolerated by
/// consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextPosition {
    /// First character
    pub start: usize,

    /// One past the last character
    pub end: usize,
}

impl TextPosition {
    /// Create a position
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Move both ends by `offset` characters
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start.saturating_add(offset),
            end: self.end.saturating_add(offset),
        }
    }

    /// True if the position covers no characters
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True if the position is non-empty and ends within `len` characters
    pub fn fits_within(&self, len: usize) -> bool {
        !self.is_empty() && self.end <= len
    }
}

/// A note as returned by the extraction oracle for one chunk.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedNote {
    /// The distilled insight
    pub content: String,

    /// Tone of the source passage
    pub sentiment: Sentiment,

    /// Up to three topical tags
    pub tags: Vec<String>,

    /// Verbatim quote of the passage the note is based on, if the oracle gave one
    pub exact_text: Option<String>,

    /// Where the passage sits; chunk-relative until the extraction client
    /// shifts it by the chunk's base offset
    pub text_position: Option<TextPosition>,

    /// Title proposed by the oracle, if any
    pub title: Option<String>,
}

impl ExtractedNote {
    /// Create a note with only content set
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Set the quoted source passage
    pub fn with_exact_text(mut self, exact_text: impl Into<String>) -> Self {
        self.exact_text = Some(exact_text.into());
        self
    }

    /// Set the reported position
    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.text_position = Some(TextPosition::new(start, end));
        self
    }

    /// Start offset used to order notes; unknown positions sort first
    pub fn sort_key(&self) -> usize {
        self.text_position.map(|p| p.start).unwrap_or(0)
    }
}

/// An extracted note that has been ordered and titled, ready to be emitted
/// and handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    /// Short title
    pub title: String,

    /// The distilled insight
    pub content: String,

    /// Tone of the source passage
    pub sentiment: Sentiment,

    /// Up to three topical tags
    pub tags: Vec<String>,

    /// Verbatim quote of the source passage
    pub exact_text: Option<String>,

    /// Document-relative position of the source passage
    pub text_position: Option<TextPosition>,
}

impl NoteDraft {
    /// Build a draft from an extracted note and the title chosen for it
    pub fn from_extracted(note: ExtractedNote, title: String) -> Self {
        Self {
            title,
            content: note.content,
            sentiment: note.sentiment,
            tags: note.tags,
            exact_text: note.exact_text,
            text_position: note.text_position,
        }
    }
}

/// A persisted note.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,

    /// Project whose source document the note points into
    pub project_id: String,

    /// Optional bucket the user filed the note under
    pub bucket_id: Option<String>,

    /// Short title
    pub title: String,

    /// The distilled insight
    pub content: String,

    /// Tone of the source passage
    pub sentiment: Sentiment,

    /// Topical tags
    pub tags: Vec<String>,

    /// Verbatim quote of the source passage
    pub exact_text: Option<String>,

    /// Document-relative position of the source passage
    pub text_position: Option<TextPosition>,

    /// Whether the user bookmarked the note
    pub is_bookmarked: bool,

    /// Creation time (milliseconds since the Unix epoch)
    pub created_at: u64,

    /// Last update time (milliseconds since the Unix epoch)
    pub updated_at: u64,
}

impl Note {
    /// Materialize a draft under a fresh identity
    pub fn from_draft(id: NoteId, project_id: impl Into<String>, draft: NoteDraft, now: u64) -> Self {
        Self {
            id,
            project_id: project_id.into(),
            bucket_id: None,
            title: draft.title,
            content: draft.content,
            sentiment: draft.sentiment,
            tags: draft.tags,
            exact_text: draft.exact_text,
            text_position: draft.text_position,
            is_bookmarked: false,
            created_at: now,
            updated_at: now,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: UUIDv7 ordering matches u128 ordering
        #[test]
        fn test_note_id_ordering_property(a: u128, b: u128) {
            prop_assert_eq!(NoteId::from_value(a) < NoteId::from_value(b), a < b);
        }

        /// Property: shifting preserves the span length
        #[test]
        fn test_shift_preserves_length(start in 0usize..10_000, len in 0usize..10_000, base in 0usize..100_000) {
            let pos = TextPosition::new(start, start + len).shifted(base);
            prop_assert_eq!(pos.end - pos.start, len);
            prop_assert_eq!(pos.start, start + base);
        }
    }
}
