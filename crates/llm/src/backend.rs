use async_trait::async_trait;
use paperbrief_common::{AppConfig, Result};
use std::fmt;
use tracing::warn;

use crate::llm_trait::Summarize;
use crate::ollama::OllamaClient;
use crate::openai::ChatCompletionsClient;

/// Supported summarization backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Hosted OpenAI API
    #[default]
    OpenAi,
    /// LM Studio local server
    Local,
    /// Ollama local server
    Ollama,
    /// FuelIX proxy
    Fuelix,
}

impl Backend {
    pub const ALL: [Backend; 4] = [Backend::OpenAi, Backend::Local, Backend::Ollama, Backend::Fuelix];

    /// Resolve a backend identifier. Unknown identifiers select OpenAI.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Backend::OpenAi,
            "local" => Backend::Local,
            "ollama" => Backend::Ollama,
            "fuelix" => Backend::Fuelix,
            other => {
                warn!("Unknown LLM backend '{}', falling back to openai", other);
                Backend::OpenAi
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::OpenAi => "openai",
            Backend::Local => "local",
            Backend::Ollama => "ollama",
            Backend::Fuelix => "fuelix",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured client for one [`Backend`]
#[derive(Debug, Clone)]
pub enum AnyBackend {
    /// OpenAI, FuelIX and LM Studio share the chat-completions wire format
    ChatCompletions(ChatCompletionsClient),
    Ollama(OllamaClient),
}

impl AnyBackend {
    /// Build the client for `backend` from its configured endpoint triplet
    pub fn from_config(backend: Backend, config: &AppConfig) -> Result<Self> {
        let timeout = config.request_timeout();

        let client = match backend {
            Backend::OpenAi => Self::ChatCompletions(
                ChatCompletionsClient::new("OpenAI", &config.openai.base_url, timeout)?
                    .with_api_key(&config.openai.api_key)
                    .with_model(&config.openai.model),
            ),
            Backend::Fuelix => Self::ChatCompletions(
                ChatCompletionsClient::new("FuelIX", &config.fuelix.base_url, timeout)?
                    .with_api_key(&config.fuelix.api_key)
                    .with_model(&config.fuelix.model),
            ),
            Backend::Local => Self::ChatCompletions(ChatCompletionsClient::new(
                "LM Studio",
                &config.local.base_url,
                timeout,
            )?),
            Backend::Ollama => Self::Ollama(OllamaClient::new(
                &config.ollama.base_url,
                &config.ollama.model,
                timeout,
            )?),
        };

        Ok(client)
    }

    /// URL requests are posted to
    pub fn endpoint(&self) -> String {
        match self {
            Self::ChatCompletions(c) => c.endpoint(),
            Self::Ollama(c) => c.chat_url().to_string(),
        }
    }

    /// Model named in requests, if any
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::ChatCompletions(c) => c.model(),
            Self::Ollama(c) => Some(c.model()),
        }
    }
}

#[async_trait]
impl Summarize for AnyBackend {
    async fn summarize(&self, title: &str, text: &str) -> Result<String> {
        match self {
            Self::ChatCompletions(c) => c.summarize(title, text).await,
            Self::Ollama(c) => c.summarize(title, text).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::ChatCompletions(c) => c.name(),
            Self::Ollama(c) => c.name(),
        }
    }
}
