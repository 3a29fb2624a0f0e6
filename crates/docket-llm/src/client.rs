//! HTTP chat-completion client with rate-limit backoff

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::types::{ChatRequest, ChatResponse};
use crate::{ChatClient, LlmError};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retries after a 429 response
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Backoff delay before retry number `attempt` (0-indexed): 2, 4, 8, 16, 32 s
///
/// The schedule is a fixed rate-limiting heuristic; only HTTP 429 triggers
/// it, all other failures are immediate and terminal for the document.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt + 1))
}

/// Chat-completion client for an OpenAI-compatible HTTP endpoint
///
/// Sends single, sequential requests with bearer-token authorization. On
/// HTTP 429 it retries with exponential backoff ([`backoff_delay`], capped
/// at [`DEFAULT_MAX_RETRIES`] retries); any other HTTP error propagates
/// immediately with its status and body so the caller can record it
/// against the document being classified.
pub struct HttpChatClient {
    endpoint: String,
    api_key: String,
    http: reqwest::Client,
    max_retries: u32,
}

impl HttpChatClient {
    /// Create a client for `endpoint` (the full chat-completions URL)
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            http,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Override the number of 429 retries (mainly for tests)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// The configured endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, request: &ChatRequest) -> Result<reqwest::Response, LlmError> {
        self.http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Transport(e.to_string())
                }
            })
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let mut attempt = 0u32;

        loop {
            debug!(model = %request.model, attempt, "sending chat completion request");
            let response = self.send_once(request).await?;
            let status = response.status();

            if status.as_u16() == 429 && attempt < self.max_retries {
                let delay = backoff_delay(attempt);
                warn!(
                    delay_secs = delay.as_secs(),
                    attempt, "rate limited (429), backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Http {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: ChatResponse = response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("failed to parse body: {e}")))?;

            return parsed
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| LlmError::InvalidResponse("response has no choices".to_string()));
        }
    }
}

impl std::fmt::Debug for HttpChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_schedule_doubles_from_two_seconds() {
        let delays: Vec<u64> = (0..5).map(|n| backoff_delay(n).as_secs()).collect();
        assert_eq!(delays, vec![2, 4, 8, 16, 32]);
    }

    #[test]
    fn client_construction() {
        let client =
            HttpChatClient::new("https://api.example.com/v1/chat/completions", "sk-test", Duration::from_secs(60))
                .unwrap();
        assert_eq!(client.endpoint(), "https://api.example.com/v1/chat/completions");
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn max_retries_override() {
        let client = HttpChatClient::new("http://localhost:1", "k", Duration::from_secs(1))
            .unwrap()
            .with_max_retries(0);
        assert_eq!(client.max_retries, 0);
    }

    #[test]
    fn debug_hides_api_key() {
        let client =
            HttpChatClient::new("http://localhost:1", "sk-secret", Duration::from_secs(1)).unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("***"));
    }
}
