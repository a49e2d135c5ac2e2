use serde::{Deserialize, Serialize};

/// Sampling temperature used by every backend call
pub const TEMPERATURE: f64 = 0.3;

/// Output length cap used by the chat-completions backends
pub const MAX_TOKENS: u32 = 1000;

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// OpenAI-style chat-completions request (OpenAI, FuelIX, LM Studio)
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model name; LM Studio serves whatever model is loaded and gets none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub messages: Vec<ChatMessage>,

    pub temperature: f64,

    pub max_tokens: u32,
}

/// OpenAI-style chat-completions response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ResponseMessage,
}

/// Assistant message as returned by a backend
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Generated text; OpenAI sends `null` for refusals and tool calls
    #[serde(default)]
    pub content: Option<String>,
}

/// Ollama `/api/chat` request
#[derive(Debug, Clone, Serialize)]
pub struct OllamaChatRequest {
    pub model: String,

    pub messages: Vec<ChatMessage>,

    /// Always false, responses are read in one piece
    pub stream: bool,
}

/// Ollama `/api/chat` non-streaming response
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaChatResponse {
    pub message: ResponseMessage,
}
