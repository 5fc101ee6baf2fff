use super::{ApiClient, ClientError, NoteList, TokenSource};
use crate::dto::{CreateNoteRequest, Note, UpdateNoteRequest};

/// Client-side state container for the signed-in user's notes.
///
/// Each operation performs one request and only touches the local list once
/// the server answered with success; on error the list is left as it was.
pub struct NoteStore<T> {
    api: ApiClient,
    tokens: T,
    notes: NoteList,
}

impl<T: TokenSource> NoteStore<T> {
    pub const fn new(api: ApiClient, tokens: T) -> Self {
        Self {
            api,
            tokens,
            notes: NoteList::new(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    fn token(&self) -> Result<String, ClientError> {
        self.tokens.token()?.ok_or(ClientError::MissingToken)
    }

    /// Replaces the local list with the server's.
    pub async fn fetch_all(&mut self) -> Result<&[Note], ClientError> {
        let token = self.token()?;
        let notes = self.api.fetch_all_notes(&token).await?;

        tracing::debug!("fetched {} notes", notes.len());
        self.notes.replace_all(notes);

        Ok(self.notes.as_slice())
    }

    /// Creates a note and appends the server's record.
    pub async fn add(
        &mut self,
        title: &str,
        description: &str,
        tag: &str,
    ) -> Result<&Note, ClientError> {
        let token = self.token()?;
        let request = CreateNoteRequest {
            title: title.to_string(),
            description: description.to_string(),
            tag: tag.to_string(),
        };
        let note = self.api.add_note(&token, &request).await?;

        tracing::debug!("added note {}", note.id);

        Ok(self.notes.append(note))
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        let token = self.token()?;
        let response = self.api.delete_note(&token, id).await?;

        tracing::debug!("deleted note {}: {}", id, response);
        self.notes.remove(id);

        Ok(())
    }

    /// Updates a note, then applies the same fields locally.
    pub async fn edit(
        &mut self,
        id: &str,
        title: &str,
        description: &str,
        tag: &str,
    ) -> Result<(), ClientError> {
        let token = self.token()?;
        let request = UpdateNoteRequest {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            tag: Some(tag.to_string()),
        };
        let response = self.api.update_note(&token, id, &request).await?;

        tracing::debug!("updated note {}: {}", id, response);
        if !self.notes.apply_edit(id, title, description, tag) {
            tracing::debug!("note {} is not in the local list", id);
        }

        Ok(())
    }
}
