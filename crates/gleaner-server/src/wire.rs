//! JSON bodies exchanged with clients
//!
//! Missing quotes and positions travel as `""` and `{start: 0, end: 0}`.

use gleaner_domain::{Note, NoteDraft, TextPosition};
use gleaner_locator::{MatchStrategy, NoteAnchor};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Source text
    #[serde(default)]
    pub text: String,

    /// Notes wanted; the configured default when absent
    pub notes_per_project: Option<usize>,

    /// Per-note character limit; the configured default when absent
    pub note_char_limit: Option<usize>,

    /// Save streamed notes under this project
    pub project_id: Option<String>,
}

/// A character range on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionView {
    /// Inclusive start
    pub start: usize,
    /// Exclusive end
    pub end: usize,
}

impl From<Option<TextPosition>> for PositionView {
    fn from(pos: Option<TextPosition>) -> Self {
        pos.map(|p| PositionView {
            start: p.start,
            end: p.end,
        })
        .unwrap_or_default()
    }
}

/// A note as streamed and listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    /// Identifier, once saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Owning project, once saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Short title
    pub title: String,

    /// Note text
    pub content: String,

    /// `positive`, `neutral` or `negative`
    pub sentiment: String,

    /// Up to three tags
    pub tags: Vec<String>,

    /// Verbatim quote, or `""`
    pub exact_text: String,

    /// Document range, or `{0, 0}`
    pub text_position: PositionView,
}

impl From<&NoteDraft> for NoteView {
    fn from(draft: &NoteDraft) -> Self {
        Self {
            id: None,
            project_id: None,
            title: draft.title.clone(),
            content: draft.content.clone(),
            sentiment: draft.sentiment.as_str().to_string(),
            tags: draft.tags.clone(),
            exact_text: draft.exact_text.clone().unwrap_or_default(),
            text_position: draft.text_position.into(),
        }
    }
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        Self {
            id: Some(note.id.to_string()),
            project_id: Some(note.project_id.clone()),
            title: note.title.clone(),
            content: note.content.clone(),
            sentiment: note.sentiment.as_str().to_string(),
            tags: note.tags.clone(),
            exact_text: note.exact_text.clone().unwrap_or_default(),
            text_position: note.text_position.into(),
        }
    }
}

/// One SSE payload carrying a note
#[derive(Debug, Serialize, Deserialize)]
pub struct NoteEnvelope {
    /// The note
    pub note: NoteView,
}

/// In-stream failure payload
#[derive(Debug, Serialize, Deserialize)]
pub struct StreamError {
    /// What went wrong
    pub error: String,
    /// Failure category name
    pub category: String,
}

/// The note part of a locate request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorView {
    /// Note text
    #[serde(default)]
    pub content: String,

    /// Verbatim quote
    pub exact_text: Option<String>,

    /// Stored range
    pub text_position: Option<PositionView>,
}

impl From<AnchorView> for NoteAnchor {
    fn from(view: AnchorView) -> Self {
        NoteAnchor {
            content: view.content,
            exact_text: view.exact_text.filter(|s| !s.trim().is_empty()),
            text_position: view
                .text_position
                .map(|p| TextPosition::new(p.start, p.end)),
        }
    }
}

/// Body of `POST /api/locate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocateRequest {
    /// Full source text
    #[serde(default)]
    pub source: String,

    /// Note to locate
    #[serde(default)]
    pub note: AnchorView,
}

/// Reply to `POST /api/locate`
#[derive(Debug, Serialize, Deserialize)]
pub struct LocateResponse {
    /// Inclusive start (characters)
    pub start: usize,
    /// Exclusive end (characters)
    pub end: usize,
    /// Rule that found the match
    pub strategy: String,
    /// Highlighted text
    pub text: String,
}

impl LocateResponse {
    pub(crate) fn new(start: usize, end: usize, strategy: MatchStrategy, text: &str) -> Self {
        Self {
            start,
            end,
            strategy: strategy.as_str().to_string(),
            text: text.to_string(),
        }
    }
}
