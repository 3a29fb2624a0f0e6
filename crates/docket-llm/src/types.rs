//! Request and response types for chat-completion calls
//!
//! These mirror the OpenAI chat completion wire format, which the
//! classification endpoint is assumed to speak.

use serde::{Deserialize, Serialize};

/// A message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Message author role: `system` or `user` here, `assistant` in replies
    pub role: String,

    /// The message content
    pub content: String,
}

impl ChatMessage {
    /// Create a message with an arbitrary role
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// Structured-output hint asking the endpoint for a bare JSON object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseFormat {
    /// Always `"json_object"`
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// The `json_object` response format
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// A chat completion request
///
/// Temperature is fixed at 0 so identical prompts classify identically.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g. `gpt-4o-mini`)
    pub model: String,

    /// Sampling temperature, always 0 for classification
    pub temperature: f32,

    /// The conversation messages
    pub messages: Vec<ChatMessage>,

    /// Maximum number of tokens to generate
    pub max_tokens: u32,

    /// Optional structured-output hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// Create a deterministic (temperature 0) request
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            temperature: 0.0,
            messages,
            max_tokens,
            response_format: None,
        }
    }

    /// Ask the endpoint to constrain its response to a JSON object
    pub fn with_json_object_format(mut self) -> Self {
        self.response_format = Some(ResponseFormat::json_object());
        self
    }
}

/// A chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the first one carries the model text
    pub choices: Vec<Choice>,
}

/// A single completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The assistant's reply
    pub message: ResponseMessage,
}

/// The assistant message within a choice
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Raw model text, expected to contain the classification JSON object
    pub content: String,
}
