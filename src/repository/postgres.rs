use std::sync::Arc;

use tokio_postgres::Row;

use super::{Database, NoteRepository, RepoFuture};
use crate::models::{NewNote, Note, NoteChanges};

const NOTE_COLUMNS: &str = "id, owner, title, description, tag, created_at, updated_at";

pub struct PostgresRepository {
    database: Arc<Database>,
}

impl PostgresRepository {
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        owner: row.get("owner"),
        title: row.get("title"),
        description: row.get("description"),
        tag: row.get("tag"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl NoteRepository for PostgresRepository {
    fn create_note(&self, note: NewNote) -> RepoFuture<'_, Note> {
        Box::pin(async move {
            let row = self
                .database
                .client()
                .query_one(
                    &format!(
                        "INSERT INTO notes (owner, title, description, tag) \
                         VALUES ($1, $2, $3, $4) RETURNING {NOTE_COLUMNS}"
                    ),
                    &[&note.owner, &note.title, &note.description, &note.tag],
                )
                .await?;

            Ok(note_from_row(&row))
        })
    }

    fn update_note(&self, id: String, changes: NoteChanges) -> RepoFuture<'_, Option<Note>> {
        Box::pin(async move {
            let row = self
                .database
                .client()
                .query_opt(
                    &format!(
                        "UPDATE notes SET \
                         title = COALESCE($1, title), \
                         description = COALESCE($2, description), \
                         tag = COALESCE($3, tag), \
                         updated_at = now() \
                         WHERE id = $4 RETURNING {NOTE_COLUMNS}"
                    ),
                    &[&changes.title, &changes.description, &changes.tag, &id],
                )
                .await?;

            Ok(row.as_ref().map(note_from_row))
        })
    }

    fn delete_note(&self, id: String) -> RepoFuture<'_, bool> {
        Box::pin(async move {
            let rows = self
                .database
                .client()
                .execute("DELETE FROM notes WHERE id = $1", &[&id])
                .await?;

            Ok(rows == 1)
        })
    }

    fn get_one_note(&self, id: String) -> RepoFuture<'_, Option<Note>> {
        Box::pin(async move {
            let row = self
                .database
                .client()
                .query_opt(
                    &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"),
                    &[&id],
                )
                .await?;

            Ok(row.as_ref().map(note_from_row))
        })
    }

    fn get_notes_by_owner(&self, owner: String) -> RepoFuture<'_, Vec<Note>> {
        Box::pin(async move {
            let rows = self
                .database
                .client()
                .query(
                    &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE owner = $1 ORDER BY seq"),
                    &[&owner],
                )
                .await?;

            Ok(rows.iter().map(note_from_row).collect())
        })
    }
}
