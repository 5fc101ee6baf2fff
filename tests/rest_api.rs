mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{ALICE_TOKEN, BOB_TOKEN, app};

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header("auth-token", token);
    }

    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

async fn add_note(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = call(
        app,
        "POST",
        "/api/notes/addnote",
        Some(token),
        Some(json!({
            "title": title,
            "description": "a long enough description",
            "tag": "work"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json_body(&body)
}

#[tokio::test]
async fn root_answers() {
    let (status, body) = call(&app(), "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Hello world!");
}

#[tokio::test]
async fn missing_or_unknown_token_is_rejected() {
    let app = app();

    let (status, body) = call(&app, "GET", "/api/notes/fetchallnotes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(&body)["error"],
        "Please authenticate using a valid token"
    );

    let (status, _) = call(
        &app,
        "GET",
        "/api/notes/fetchallnotes",
        Some("forged"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn added_notes_are_listed_for_their_owner_only() {
    let app = app();

    let created = add_note(&app, ALICE_TOKEN, "Groceries").await;
    assert_eq!(created["user"], "alice");
    assert_eq!(created["title"], "Groceries");
    assert!(created["_id"].is_string());
    assert!(created["date"].is_string());

    let (status, body) = call(
        &app,
        "GET",
        "/api/notes/fetchallnotes",
        Some(ALICE_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!([created]));

    let (_, body) = call(&app, "GET", "/api/notes/fetchallnotes", Some(BOB_TOKEN), None).await;
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn invalid_note_fields_are_reported() {
    let (status, body) = call(
        &app(),
        "POST",
        "/api/notes/addnote",
        Some(ALICE_TOKEN),
        Some(json!({ "title": "ab", "description": "ok", "tag": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = json_body(&body)["errors"].clone();
    assert_eq!(errors[0]["field"], "title");
    assert_eq!(errors[1]["field"], "description");
}

#[tokio::test]
async fn missing_tag_defaults_to_general() {
    let (status, body) = call(
        &app(),
        "POST",
        "/api/notes/addnote",
        Some(ALICE_TOKEN),
        Some(json!({ "title": "Reading", "description": "Finish the book" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["tag"], "General");
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let app = app();
    let created = add_note(&app, ALICE_TOKEN, "Groceries").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/notes/updatenote/{id}"),
        Some(ALICE_TOKEN),
        Some(json!({ "title": "Shopping" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let note = json_body(&body)["note"].clone();
    assert_eq!(note["title"], "Shopping");
    assert_eq!(note["description"], created["description"]);
    assert_eq!(note["tag"], created["tag"]);
    assert_eq!(note["date"], created["date"]);
}

#[tokio::test]
async fn foreign_and_unknown_notes_are_refused() {
    let app = app();
    let created = add_note(&app, ALICE_TOKEN, "Private").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = call(
        &app,
        "DELETE",
        &format!("/api/notes/deletenote/{id}"),
        Some(BOB_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, b"Not Allowed");

    let (status, body) = call(
        &app,
        "PUT",
        "/api/notes/updatenote/does-not-exist",
        Some(ALICE_TOKEN),
        Some(json!({ "title": "Anything" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Not Found");
}

#[tokio::test]
async fn delete_returns_the_removed_note() {
    let app = app();
    let created = add_note(&app, ALICE_TOKEN, "Temporary").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = call(
        &app,
        "DELETE",
        &format!("/api/notes/deletenote/{id}"),
        Some(ALICE_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = json_body(&body);
    assert_eq!(body["success"], "Note has been deleted");
    assert_eq!(body["note"], created);

    let (_, body) = call(
        &app,
        "GET",
        "/api/notes/fetchallnotes",
        Some(ALICE_TOKEN),
        None,
    )
    .await;
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn openapi_document_lists_note_routes() {
    let (status, body) = call(&app(), "GET", "/api-doc/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let paths = json_body(&body)["paths"].clone();
    for path in [
        "/api/notes/fetchallnotes",
        "/api/notes/addnote",
        "/api/notes/updatenote/{id}",
        "/api/notes/deletenote/{id}",
    ] {
        assert!(paths.get(path).is_some(), "missing {path}");
    }
}
