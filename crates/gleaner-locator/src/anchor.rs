//! Inputs and outputs of span location

use gleaner_domain::{Note, NoteDraft, TextPosition};
use serde::Serialize;

/// The parts of a note that tie it to its source
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteAnchor {
    /// Paraphrased note text
    pub content: String,

    /// Verbatim quote from the source, when the oracle supplied one
    pub exact_text: Option<String>,

    /// Stored character range into the source
    pub text_position: Option<TextPosition>,
}

impl NoteAnchor {
    /// Anchor carrying only content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Attach a verbatim quote
    pub fn with_exact_text(mut self, exact_text: impl Into<String>) -> Self {
        self.exact_text = Some(exact_text.into());
        self
    }

    /// Attach a stored range
    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.text_position = Some(TextPosition::new(start, end));
        self
    }
}

impl From<&Note> for NoteAnchor {
    fn from(note: &Note) -> Self {
        Self {
            content: note.content.clone(),
            exact_text: note.exact_text.clone(),
            text_position: note.text_position,
        }
    }
}

impl From<&NoteDraft> for NoteAnchor {
    fn from(draft: &NoteDraft) -> Self {
        Self {
            content: draft.content.clone(),
            exact_text: draft.exact_text.clone(),
            text_position: draft.text_position,
        }
    }
}

/// Which rule produced a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Literal occurrence of the exact quote
    ExactQuote,
    /// Opening words of the exact quote, widened to their paragraph
    ExactQuoteProbe,
    /// The stored range, taken as is
    StoredPosition,
    /// Literal occurrence of the content
    ContentExact,
    /// Content found once whitespace runs are collapsed
    ContentNormalized,
    /// Case-insensitive content phrase, widened to its paragraph
    ContentPhrase,
    /// Nothing matched; the opening paragraph
    Fallback,
}

impl MatchStrategy {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::ExactQuote => "exact_quote",
            MatchStrategy::ExactQuoteProbe => "exact_quote_probe",
            MatchStrategy::StoredPosition => "stored_position",
            MatchStrategy::ContentExact => "content_exact",
            MatchStrategy::ContentNormalized => "content_normalized",
            MatchStrategy::ContentPhrase => "content_phrase",
            MatchStrategy::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A character range of the source to highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedSpan {
    /// First character, inclusive
    pub start: usize,
    /// Last character, exclusive
    pub end: usize,
    /// Rule that found the raw match
    pub strategy: MatchStrategy,
}

impl ResolvedSpan {
    /// Length in characters
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-width span
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The highlighted text of `source`
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        let mut indices = source.char_indices().map(|(b, _)| b).chain([source.len()]);
        let start = indices.nth(self.start).unwrap_or(source.len());
        let end = if self.end > self.start {
            indices.nth(self.end - self.start - 1).unwrap_or(source.len())
        } else {
            start
        };
        &source[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_domain::{ExtractedNote, NoteId};

    #[test]
    fn test_anchor_from_draft_and_note() {
        let extracted = ExtractedNote::new("content")
            .with_exact_text("quote")
            .with_position(3, 8);
        let draft = NoteDraft::from_extracted(extracted, "Title".to_string());
        let from_draft = NoteAnchor::from(&draft);
        assert_eq!(from_draft.exact_text.as_deref(), Some("quote"));
        assert_eq!(from_draft.text_position, Some(TextPosition::new(3, 8)));

        let note = Note::from_draft(NoteId::new(), "p1", draft, 1);
        assert_eq!(NoteAnchor::from(&note), from_draft);
    }

    #[test]
    fn test_span_text_uses_character_offsets() {
        let span = ResolvedSpan {
            start: 2,
            end: 5,
            strategy: MatchStrategy::Fallback,
        };
        assert_eq!(span.text("aébcdé"), "bcd");
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn test_empty_span_text() {
        let span = ResolvedSpan {
            start: 0,
            end: 0,
            strategy: MatchStrategy::Fallback,
        };
        assert_eq!(span.text(""), "");
        assert!(span.is_empty());
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(MatchStrategy::ContentPhrase.to_string(), "content_phrase");
        assert_eq!(
            serde_json::to_string(&MatchStrategy::ExactQuoteProbe).unwrap(),
            "\"exact_quote_probe\""
        );
    }
}
