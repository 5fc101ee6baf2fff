mod auth;

pub use auth::{AUTH_HEADER, AuthUser, TokenRegistry};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use axum_macros::debug_handler;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        CreateNoteRequest, DeleteNoteResponse, ErrorResponse, FieldError, Note,
        UpdateNoteRequest, UpdateNoteResponse, ValidationErrors,
    },
    service::{NoteService, ServiceError},
};

pub struct AppState {
    pub service: NoteService,
    pub tokens: TokenRegistry,
}

impl AppState {
    pub const fn new(service: NoteService, tokens: TokenRegistry) -> Self {
        Self { service, tokens }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(get_all_notes, create_note, update_note, delete_note),
    components(schemas(
        Note,
        CreateNoteRequest,
        UpdateNoteRequest,
        UpdateNoteResponse,
        DeleteNoteResponse,
        FieldError,
        ValidationErrors,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

pub fn router(state: Arc<AppState>) -> Router {
    let notes = Router::new()
        .route("/fetchallnotes", get(get_all_notes))
        .route("/addnote", post(create_note))
        .route("/updatenote/{id}", put(update_note))
        .route("/deletenote/{id}", delete(delete_note));

    Router::new()
        .route("/", get(root))
        .route("/api-doc/openapi.json", get(openapi))
        .nest("/api/notes", notes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Hello world!").into_response()
}

async fn openapi() -> Response {
    Json(ApiDoc::openapi()).into_response()
}

fn service_error_response(e: ServiceError, action: &str) -> Response {
    match e {
        ServiceError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        ServiceError::NotAllowed => (StatusCode::UNAUTHORIZED, "Not Allowed").into_response(),
        ServiceError::Repository(e) => {
            tracing::error!("failed to {action} note entry: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/notes/fetchallnotes",
    params(
        ("auth-token" = String, Header, description = "Issued auth-token")
    ),
    responses(
        (status = 200, description = "All notes of the user", body = Vec<Note>),
        (status = 401, description = "Missing or invalid auth-token", body = ErrorResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Response {
    match state.service.get_all_notes(&user).await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to get note entries: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/notes/addnote",
    params(
        ("auth-token" = String, Header, description = "Issued auth-token")
    ),
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note created successfully", body = Note),
        (status = 400, description = "Invalid note fields", body = ValidationErrors),
        (status = 401, description = "Missing or invalid auth-token", body = ErrorResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateNoteRequest>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ValidationErrors { errors })).into_response();
    }

    match state.service.create_note(&user, payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => {
            tracing::error!("failed to create note entry: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/notes/updatenote/{id}",
    params(
        ("id" = String, Path, description = "Note ID"),
        ("auth-token" = String, Header, description = "Issued auth-token")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = UpdateNoteResponse),
        (status = 401, description = "Invalid auth-token or note of another user"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Response {
    match state.service.update_note(&user, &id, payload).await {
        Ok(note) => (StatusCode::OK, Json(UpdateNoteResponse { note })).into_response(),
        Err(e) => service_error_response(e, "update"),
    }
}

#[utoipa::path(
    delete,
    path = "/api/notes/deletenote/{id}",
    params(
        ("id" = String, Path, description = "Note ID"),
        ("auth-token" = String, Header, description = "Issued auth-token")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = DeleteNoteResponse),
        (status = 401, description = "Invalid auth-token or note of another user"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Response {
    match state.service.delete_note(&user, &id).await {
        Ok(note) => (
            StatusCode::OK,
            Json(DeleteNoteResponse {
                success: "Note has been deleted".to_string(),
                note,
            }),
        )
            .into_response(),
        Err(e) => service_error_response(e, "delete"),
    }
}
