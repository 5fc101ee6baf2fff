mod database;
mod embedded;
mod memory;
mod postgres;

pub use database::{Database, bootstrap, redact_dsn};
pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;

use std::{future::Future, pin::Pin};

use crate::models::{NewNote, Note, NoteChanges};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),
}

pub type RepoFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Storage for notes, shared by every request handler.
pub trait NoteRepository: Send + Sync {
    fn create_note(&self, note: NewNote) -> RepoFuture<'_, Note>;

    /// Returns `None` when no note has this id.
    fn update_note(&self, id: String, changes: NoteChanges) -> RepoFuture<'_, Option<Note>>;

    /// Returns `false` when no note has this id.
    fn delete_note(&self, id: String) -> RepoFuture<'_, bool>;

    fn get_one_note(&self, id: String) -> RepoFuture<'_, Option<Note>>;

    /// All notes of one owner, oldest first.
    fn get_notes_by_owner(&self, owner: String) -> RepoFuture<'_, Vec<Note>>;
}
