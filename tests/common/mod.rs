#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use inotebook::{
    config::UserToken,
    handlers::rest::{self, AppState, TokenRegistry},
    repository::InMemoryRepository,
    service::NoteService,
};

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";

pub fn app() -> Router {
    let users = [
        UserToken {
            user: "alice".to_string(),
            token: ALICE_TOKEN.to_string(),
        },
        UserToken {
            user: "bob".to_string(),
            token: BOB_TOKEN.to_string(),
        },
    ];

    let service = NoteService::new(Arc::new(InMemoryRepository::new()));
    rest::router(Arc::new(AppState::new(
        service,
        TokenRegistry::from_users(&users),
    )))
}

/// Serves a fresh app on an ephemeral port and returns its base URL.
pub async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });

    format!("http://{addr}")
}
