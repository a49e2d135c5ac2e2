use async_trait::async_trait;
use paperbrief_common::{PaperBriefError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::http::{build_client, join_url};
use crate::llm_trait::Summarize;
use crate::prompts::summary_conversation;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, MAX_TOKENS, TEMPERATURE};

/// Client for OpenAI-compatible `/chat/completions` endpoints
///
/// Serves the hosted OpenAI API, the FuelIX proxy and LM Studio. The first
/// two authenticate with a bearer key and name a model; LM Studio gets
/// neither.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    name: String,
    base_url: String,
    api_key: Option<String>,
    model: Option<String>,
    client: Client,
}

impl ChatCompletionsClient {
    /// Create new client for `base_url` (the part before `/chat/completions`)
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let name = name.into();
        let base_url = base_url.into();
        let client = build_client(timeout)?;

        debug!("{} client initialized: {}", name, base_url);
        Ok(Self {
            name,
            base_url,
            api_key: None,
            model: None,
            client,
        })
    }

    /// Authenticate with a bearer key; an empty key is ignored
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
        self
    }

    /// Name the model in every request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Full chat-completions URL
    pub fn endpoint(&self) -> String {
        join_url(&self.base_url, "chat/completions")
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Request body for a conversation
    pub fn build_request(&self, messages: Vec<ChatMessage>) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    /// Send one chat request and return the first choice's content
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let url = self.endpoint();
        let request = self.build_request(messages);

        debug!(
            "Sending chat request to {} - Model: {}, Messages: {}",
            url,
            request.model.as_deref().unwrap_or("<server default>"),
            request.messages.len()
        );

        let mut builder = self.client.post(&url).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PaperBriefError::network(format!("Failed to send request to {}: {}", self.name, e)))?
            .error_for_status()
            .map_err(|e| PaperBriefError::network(format!("{} API error: {}", self.name, e)))?;

        let result: ChatCompletionResponse = response.json().await.map_err(|e| {
            PaperBriefError::malformed_response(format!("Failed to parse {} response: {}", self.name, e))
        })?;

        let content = result
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PaperBriefError::malformed_response(format!("{} returned no choices", self.name)))?
            .message
            .content
            .ok_or_else(|| {
                PaperBriefError::malformed_response(format!("{} returned a choice without content", self.name))
            })?;

        debug!("Received response from {} - Length: {}", self.name, content.len());
        Ok(content)
    }
}

#[async_trait]
impl Summarize for ChatCompletionsClient {
    async fn summarize(&self, title: &str, text: &str) -> Result<String> {
        self.chat(summary_conversation(title, text)).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_openai_request_shape() {
        let server = MockServer::start().await;
        let expected_body = json!({
            "model": "gpt-4o-mini",
            "messages": summary_conversation("Paper", "Body text"),
            "temperature": 0.3,
            "max_tokens": 1000
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("content-type", "application/json"))
            .and(body_json(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("A concise summary.")))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new("OpenAI", format!("{}/v1", server.uri()), None)
            .unwrap()
            .with_api_key("sk-test")
            .with_model("gpt-4o-mini");

        let summary = client.summarize("Paper", "Body text").await.unwrap();
        assert_eq!(summary, "A concise summary.");
    }

    #[tokio::test]
    async fn test_local_request_shape() {
        let server = MockServer::start().await;
        let expected_body = json!({
            "messages": summary_conversation("Paper", "Body text"),
            "temperature": 0.3,
            "max_tokens": 1000
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_json(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Local summary.")))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new("LM Studio", format!("{}/v1/", server.uri()), None).unwrap();

        let summary = client.summarize("Paper", "Body text").await.unwrap();
        assert_eq!(summary, "Local summary.");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new("OpenAI", server.uri(), None).unwrap();
        let err = client.summarize("Paper", "Body").await.unwrap_err();
        assert!(matches!(err, PaperBriefError::Network(_)));
    }

    #[tokio::test]
    async fn test_malformed_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("this is not json {{{"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let client = ChatCompletionsClient::new("OpenAI", server.uri(), None).unwrap();
        for _ in 0..3 {
            let err = client.summarize("Paper", "Body").await.unwrap_err();
            assert!(matches!(err, PaperBriefError::MalformedResponse(_)), "unexpected error: {err}");
        }
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        let client = ChatCompletionsClient::new("FuelIX", "https://proxy.fuelix.ai", None)
            .unwrap()
            .with_api_key("");
        assert!(client.api_key.is_none());
        assert_eq!(client.endpoint(), "https://proxy.fuelix.ai/chat/completions");
    }
}
