//! Docket LLM Client Layer
//!
//! The chat-completion seam of the classification pipeline. The
//! [`ChatClient`] trait abstracts the remote model endpoint so the
//! orchestrator can be driven by [`HttpChatClient`] in production and by
//! [`MockClient`] in tests.
//!
//! # Clients
//!
//! - `HttpChatClient`: OpenAI-compatible HTTP endpoint with bounded
//!   exponential backoff on rate limiting
//! - `MockClient`: deterministic scripted responses, no network

#![warn(missing_docs)]

pub mod client;
pub mod types;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpChatClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

/// Errors that can occur during a chat-completion call
///
/// Only rate limiting is transient; every other variant is terminal for the
/// document being classified and surfaces immediately to the caller.
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// Non-success HTTP status, including 429 after retries are exhausted
    #[error("HTTP {status}: {body}")]
    Http {
        /// The HTTP status code
        status: u16,
        /// The response body, best effort
        body: String,
    },

    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// Network or protocol failure before a status was received
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint replied with a body that is not a chat completion
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A client that can execute one chat-completion request
///
/// Implementations return the raw model text from the first choice;
/// interpreting that text is the output parser's job, not the client's.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Execute the request and return the model's raw text
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

/// Scripted chat client for deterministic testing
///
/// Returns queued responses in order, falling back to a default response
/// once the queue is empty. Never makes a network call.
///
/// # Examples
///
/// ```
/// use docket_llm::{ChatClient, ChatMessage, ChatRequest, MockClient};
///
/// # tokio_test::block_on(async {
/// let client = MockClient::new(r#"{"status": "Passed"}"#);
/// let request = ChatRequest::new("test-model", vec![ChatMessage::user("case text")], 256);
/// let text = client.complete(&request).await.unwrap();
/// assert_eq!(text, r#"{"status": "Passed"}"#);
/// assert_eq!(client.call_count(), 1);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockClient {
    default_response: String,
    scripted: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockClient {
    /// Create a mock returning a fixed response for every request
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a response to be returned before the default kicks in
    pub fn push_response(&self, response: impl Into<String>) {
        self.scripted.lock().unwrap().push_back(Ok(response.into()));
    }

    /// Queue an error to be returned before the default kicks in
    pub fn push_error(&self, error: LlmError) {
        self.scripted.lock().unwrap().push_back(Err(error));
    }

    /// Number of completed `complete` calls so far
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl ChatClient for MockClient {
    async fn complete(&self, _request: &ChatRequest) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        match self.scripted.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChatRequest {
        ChatRequest::new("test-model", vec![ChatMessage::user("hi")], 64)
    }

    #[tokio::test]
    async fn mock_returns_default_response() {
        let client = MockClient::new("fixed");
        assert_eq!(client.complete(&request()).await.unwrap(), "fixed");
        assert_eq!(client.complete(&request()).await.unwrap(), "fixed");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn mock_drains_scripted_responses_first() {
        let client = MockClient::new("default");
        client.push_response("first");
        client.push_error(LlmError::Http {
            status: 500,
            body: "boom".into(),
        });

        assert_eq!(client.complete(&request()).await.unwrap(), "first");
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Http { status: 500, .. }));
        assert_eq!(client.complete(&request()).await.unwrap(), "default");
    }

    #[tokio::test]
    async fn mock_clones_share_state() {
        let client = MockClient::default();
        let other = client.clone();
        client.complete(&request()).await.unwrap();
        assert_eq!(other.call_count(), 1);
    }
}
