//! In-memory persistence for generated notes

use gleaner_domain::traits::NoteStore;
use gleaner_domain::{Note, NoteDraft, NoteId};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors from [`InMemoryNoteStore`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Notes must belong to a project
    #[error("project id must not be empty")]
    MissingProject,
}

/// Process-local [`NoteStore`]
///
/// Assigns UUIDv7 identifiers and millisecond timestamps. Contents are lost
/// when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    notes: HashMap<NoteId, Note>,
    by_project: HashMap<String, Vec<NoteId>>,
}

impl InMemoryNoteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notes across all projects
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True if nothing was saved yet
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl NoteStore for InMemoryNoteStore {
    type Error = StoreError;

    fn save(&mut self, project_id: &str, draft: NoteDraft) -> Result<Note, Self::Error> {
        if project_id.trim().is_empty() {
            return Err(StoreError::MissingProject);
        }

        let note = Note::from_draft(NoteId::new(), project_id, draft, now_millis());
        self.by_project
            .entry(project_id.to_string())
            .or_default()
            .push(note.id);
        self.notes.insert(note.id, note.clone());

        Ok(note)
    }

    fn get(&self, id: NoteId) -> Result<Option<Note>, Self::Error> {
        Ok(self.notes.get(&id).cloned())
    }

    fn list(&self, project_id: &str) -> Result<Vec<Note>, Self::Error> {
        Ok(self
            .by_project
            .get(project_id)
            .map(|ids| ids.iter().filter_map(|id| self.notes.get(id)).cloned().collect())
            .unwrap_or_default())
    }
}
