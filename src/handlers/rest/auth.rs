use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use std::{collections::HashMap, sync::Arc};

use super::AppState;
use crate::{config::UserToken, dto::ErrorResponse};

pub const AUTH_HEADER: &str = "auth-token";

/// Maps issued auth-tokens to user names.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    users: HashMap<String, String>,
}

impl TokenRegistry {
    pub fn from_users(users: &[UserToken]) -> Self {
        Self {
            users: users
                .iter()
                .map(|u| (u.token.clone(), u.user.clone()))
                .collect(),
        }
    }

    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.users.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// The user identified by the request's `auth-token` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(AUTH_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|token| state.tokens.resolve(token));

        match user {
            Some(user) => Ok(Self(user.to_string())),
            None => {
                tracing::warn!("rejected request to {} without a valid auth-token", parts.uri);
                Err((
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Please authenticate using a valid token".to_string(),
                    }),
                )
                    .into_response())
            }
        }
    }
}
