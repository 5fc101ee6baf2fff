use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models;

pub const MIN_TITLE_LEN: usize = 3;
pub const MIN_DESCRIPTION_LEN: usize = 5;

/// Note as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Note {
    /// Note ID, assigned by the server
    #[serde(rename = "_id")]
    pub id: String,
    /// Name of the user owning the note
    #[serde(rename = "user")]
    pub owner: String,
    /// Note title
    pub title: String,
    /// Note body
    pub description: String,
    /// Classification label
    pub tag: String,
    /// Creation timestamp
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

impl From<models::Note> for Note {
    fn from(note: models::Note) -> Self {
        Self {
            id: note.id,
            owner: note.owner,
            title: note.title,
            description: note.description,
            tag: note.tag,
            created_at: note.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title, at least 3 characters
    pub title: String,
    /// Note body, at least 5 characters
    pub description: String,
    /// Classification label, "General" when empty
    #[serde(default)]
    pub tag: String,
}

impl CreateNoteRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.title.chars().count() < MIN_TITLE_LEN {
            errors.push(FieldError {
                field: "title".to_string(),
                msg: format!("Title must be at least {MIN_TITLE_LEN} characters"),
            });
        }
        if self.description.chars().count() < MIN_DESCRIPTION_LEN {
            errors.push(FieldError {
                field: "description".to_string(),
                msg: format!("Description must be at least {MIN_DESCRIPTION_LEN} characters"),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl From<UpdateNoteRequest> for models::NoteChanges {
    fn from(request: UpdateNoteRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            tag: request.tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteResponse {
    pub note: Note,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteNoteResponse {
    pub success: String,
    pub note: Note,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
