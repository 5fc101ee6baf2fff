use reqwest::StatusCode;

use super::token::TokenError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("no auth-token stored, log in first")]
    MissingToken,

    #[error("failed to read auth-token: {0}")]
    Token(#[from] TokenError),

    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("not authorized ({status}): {body}")]
    Unauthorized { status: StatusCode, body: String },

    #[error("note not found")]
    NotFound,

    #[error("request rejected ({status}): {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("server error ({status}): {body}")]
    Server { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Classifies a non-success response.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body).into_owned();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized { status, body },
            StatusCode::NOT_FOUND => Self::NotFound,
            s if s.is_client_error() => Self::Rejected { status, body },
            _ => Self::Server { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_classified() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, b"Not Allowed"),
            ClientError::Unauthorized { .. }
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, b""),
            ClientError::NotFound
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, b"{}"),
            ClientError::Rejected { .. }
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, b""),
            ClientError::Server { .. }
        ));
    }
}
