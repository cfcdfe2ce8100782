//! Remote agent service client
//!
//! The agent service owns the conversation; this module only consumes its
//! three endpoints.

mod error;
mod http;
mod types;


pub use error::{BackendError, BackendErrorKind};
pub use http::HttpChatBackend;
pub use types::SubmitTurnRequest;

use crate::transcript::Turn;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Consumed contract of the remote agent service
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// `GET /chat/history`
    async fn fetch_history(&self) -> Result<Vec<Turn>, BackendError>;

    /// `POST /chat`, returning the full updated transcript
    async fn send_turn(&self, user_input: &str) -> Result<Vec<Turn>, BackendError>;

    /// `POST /chat/clear`; the response body is discarded
    async fn clear_history(&self) -> Result<(), BackendError>;
}

#[async_trait]
impl<T: ChatBackend + ?Sized> ChatBackend for Arc<T> {
    async fn fetch_history(&self) -> Result<Vec<Turn>, BackendError> {
        (**self).fetch_history().await
    }

    async fn send_turn(&self, user_input: &str) -> Result<Vec<Turn>, BackendError> {
        (**self).send_turn(user_input).await
    }

    async fn clear_history(&self) -> Result<(), BackendError> {
        (**self).clear_history().await
    }
}

/// Logging wrapper for agent service calls
pub struct LoggingBackend<B> {
    inner: B,
}

impl<B: ChatBackend> LoggingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    fn log_outcome<T>(
        operation: &'static str,
        started: Instant,
        result: &Result<T, BackendError>,
        turns: Option<usize>,
    ) {
        let duration = started.elapsed();
        match result {
            Ok(_) => {
                tracing::info!(
                    operation,
                    duration_ms = %duration.as_millis(),
                    turns,
                    "Agent service call completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    operation,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Agent service call failed"
                );
            }
        }
    }
}

#[async_trait]
impl<B: ChatBackend> ChatBackend for LoggingBackend<B> {
    async fn fetch_history(&self) -> Result<Vec<Turn>, BackendError> {
        let started = Instant::now();
        let result = self.inner.fetch_history().await;
        let turns = result.as_ref().ok().map(Vec::len);
        Self::log_outcome("fetch_history", started, &result, turns);
        result
    }

    async fn send_turn(&self, user_input: &str) -> Result<Vec<Turn>, BackendError> {
        let started = Instant::now();
        let result = self.inner.send_turn(user_input).await;
        let turns = result.as_ref().ok().map(Vec::len);
        Self::log_outcome("send_turn", started, &result, turns);
        result
    }

    async fn clear_history(&self) -> Result<(), BackendError> {
        let started = Instant::now();
        let result = self.inner.clear_history().await;
        Self::log_outcome("clear_history", started, &result, None);
        result
    }
}
