//! HTTP implementation of the agent service contract

use super::types::SubmitTurnRequest;
use super::{BackendError, ChatBackend};
use crate::transcript::Turn;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

/// Agent service reached over HTTP at a fixed base address
pub struct HttpChatBackend {
    client: Client,
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Read the body of a successful response as a turn sequence
    async fn read_turns(response: Response) -> Result<Vec<Turn>, BackendError> {
        let body = Self::read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| {
            BackendError::malformed(format!("Failed to parse transcript: {e} - body: {body}"))
        })
    }

    /// Fail on non-success status, otherwise return the body text
    async fn read_body(response: Response) -> Result<String, BackendError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::connectivity(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(BackendError::server(format!("HTTP {status}: {body}")));
        }

        Ok(body)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn fetch_history(&self) -> Result<Vec<Turn>, BackendError> {
        let response = self.client.get(self.url("/chat/history")).send().await?;
        Self::read_turns(response).await
    }

    async fn send_turn(&self, user_input: &str) -> Result<Vec<Turn>, BackendError> {
        let response = self
            .client
            .post(self.url("/chat"))
            .json(&SubmitTurnRequest::new(user_input))
            .send()
            .await?;
        Self::read_turns(response).await
    }

    async fn clear_history(&self) -> Result<(), BackendError> {
        let response = self.client.post(self.url("/chat/clear")).send().await?;
        Self::read_body(response).await.map(|_| ())
    }
}
