use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use std::time::Duration;

use super::ClientError;
use crate::{
    dto::{CreateNoteRequest, Note, UpdateNoteRequest},
    handlers::rest::AUTH_HEADER,
};

/// Thin wrapper over the four notes endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// `timeout` of `None` waits as long as the network layer does.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["api", "notes"])
                .extend(segments);
        }
        url
    }

    pub async fn fetch_all_notes(&self, token: &str) -> Result<Vec<Note>, ClientError> {
        let url = self.endpoint(&["fetchallnotes"]);
        self.send(self.http.get(url).header(AUTH_HEADER, token)).await
    }

    pub async fn add_note(
        &self,
        token: &str,
        request: &CreateNoteRequest,
    ) -> Result<Note, ClientError> {
        let url = self.endpoint(&["addnote"]);
        self.send(self.http.post(url).header(AUTH_HEADER, token).json(request))
            .await
    }

    /// The response shape is not relied upon.
    pub async fn delete_note(&self, token: &str, id: &str) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&["deletenote", id]);
        self.send(self.http.delete(url).header(AUTH_HEADER, token))
            .await
    }

    /// The response shape is not relied upon.
    pub async fn update_note(
        &self,
        token: &str,
        id: &str,
        request: &UpdateNoteRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&["updatenote", id]);
        self.send(self.http.put(url).header(AUTH_HEADER, token).json(request))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await?;

        tracing::debug!("{} answered {} with {} bytes", url, status, body.len());

        if !status.is_success() {
            return Err(ClientError::from_status(status, &body));
        }

        let body: &[u8] = if body.is_empty() { b"null" } else { &body };
        Ok(serde_json::from_slice(body)?)
    }
}
