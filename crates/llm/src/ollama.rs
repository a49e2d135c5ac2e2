use async_trait::async_trait;
use paperbrief_common::{PaperBriefError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::http::build_client;
use crate::llm_trait::Summarize;
use crate::prompts::summary_conversation;
use crate::types::{ChatMessage, OllamaChatRequest, OllamaChatResponse};

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// Full chat URL, e.g. `http://localhost:11434/api/chat`
    chat_url: String,
    model: String,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(chat_url: impl Into<String>, model: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let chat_url = chat_url.into();
        let model = model.into();
        let client = build_client(timeout)?;

        info!("Ollama client initialized: {} (model: {})", chat_url, model);
        Ok(Self {
            chat_url,
            model,
            client,
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request body for a conversation
    pub fn build_request(&self, messages: Vec<ChatMessage>) -> OllamaChatRequest {
        OllamaChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        }
    }

    /// Send one non-streaming chat request and return the message content
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = self.build_request(messages);

        debug!(
            "Calling Ollama API at {} - Model: {}, Messages: {}",
            self.chat_url,
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&self.chat_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| PaperBriefError::network(format!("Failed to send request to Ollama: {}", e)))?
            .error_for_status()
            .map_err(|e| PaperBriefError::network(format!("Ollama API error: {}", e)))?;

        let result: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| PaperBriefError::malformed_response(format!("Failed to parse Ollama response: {}", e)))?;

        let content = result
            .message
            .content
            .ok_or_else(|| PaperBriefError::malformed_response("Ollama returned a message without content"))?;

        debug!("Received response from Ollama - Length: {}", content.len());
        Ok(content)
    }
}

#[async_trait]
impl Summarize for OllamaClient {
    async fn summarize(&self, title: &str, text: &str) -> Result<String> {
        self.chat(summary_conversation(title, text)).await
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
