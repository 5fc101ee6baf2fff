use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;

use super::{NoteRepository, RepoFuture};
use crate::models::{NewNote, Note, NoteChanges};

/// Process-local repository, used by tests and local runs without a database.
#[derive(Default)]
pub struct InMemoryRepository {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{n:024x}")
    }
}

impl NoteRepository for InMemoryRepository {
    fn create_note(&self, note: NewNote) -> RepoFuture<'_, Note> {
        Box::pin(async move {
            let now = Utc::now();
            let note = Note {
                id: self.generate_id(),
                owner: note.owner,
                title: note.title,
                description: note.description,
                tag: note.tag,
                created_at: now,
                updated_at: now,
            };

            self.notes.lock().await.push(note.clone());
            Ok(note)
        })
    }

    fn update_note(&self, id: String, changes: NoteChanges) -> RepoFuture<'_, Option<Note>> {
        Box::pin(async move {
            let mut notes = self.notes.lock().await;
            let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
                return Ok(None);
            };

            if let Some(title) = changes.title {
                note.title = title;
            }
            if let Some(description) = changes.description {
                note.description = description;
            }
            if let Some(tag) = changes.tag {
                note.tag = tag;
            }
            note.updated_at = Utc::now();

            Ok(Some(note.clone()))
        })
    }

    fn delete_note(&self, id: String) -> RepoFuture<'_, bool> {
        Box::pin(async move {
            let mut notes = self.notes.lock().await;
            let before = notes.len();
            notes.retain(|note| note.id != id);
            Ok(notes.len() < before)
        })
    }

    fn get_one_note(&self, id: String) -> RepoFuture<'_, Option<Note>> {
        Box::pin(async move {
            let notes = self.notes.lock().await;
            Ok(notes.iter().find(|note| note.id == id).cloned())
        })
    }

    fn get_notes_by_owner(&self, owner: String) -> RepoFuture<'_, Vec<Note>> {
        Box::pin(async move {
            let notes = self.notes.lock().await;
            Ok(notes
                .iter()
                .filter(|note| note.owner == owner)
                .cloned()
                .collect())
        })
    }
}
