use crate::{
    dto::{CreateNoteRequest, Note, UpdateNoteRequest},
    models::{self, NewNote},
    repository::{NoteRepository, RepositoryError},
};

use std::sync::Arc;

pub const DEFAULT_TAG: &str = "General";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("note not found")]
    NotFound,

    #[error("note belongs to another user")]
    NotAllowed,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all_notes(&self, owner: &str) -> Result<Vec<Note>, RepositoryError> {
        self.repo
            .get_notes_by_owner(owner.to_string())
            .await
            .map(|notes| notes.into_iter().map(Note::from).collect())
    }

    pub async fn create_note(
        &self,
        owner: &str,
        request: CreateNoteRequest,
    ) -> Result<Note, RepositoryError> {
        let tag = if request.tag.trim().is_empty() {
            DEFAULT_TAG.to_string()
        } else {
            request.tag
        };

        let note = self
            .repo
            .create_note(NewNote {
                owner: owner.to_string(),
                title: request.title,
                description: request.description,
                tag,
            })
            .await?;

        tracing::info!("Note {} created for {}", note.id, owner);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        owner: &str,
        id: &str,
        request: UpdateNoteRequest,
    ) -> Result<Note, ServiceError> {
        self.owned_note(owner, id).await?;

        self.repo
            .update_note(id.to_string(), request.into())
            .await?
            .map(Note::from)
            .ok_or(ServiceError::NotFound)
    }

    pub async fn delete_note(&self, owner: &str, id: &str) -> Result<Note, ServiceError> {
        let note = self.owned_note(owner, id).await?;

        if self.repo.delete_note(id.to_string()).await? {
            tracing::info!("Note {} deleted for {}", id, owner);
            Ok(note.into())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    async fn owned_note(&self, owner: &str, id: &str) -> Result<models::Note, ServiceError> {
        let note = self
            .repo
            .get_one_note(id.to_string())
            .await?
            .ok_or(ServiceError::NotFound)?;

        if note.owner == owner {
            Ok(note)
        } else {
            tracing::warn!("{} attempted to modify note {} owned by another user", owner, id);
            Err(ServiceError::NotAllowed)
        }
    }
}
