use crate::error::PaperBriefError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Connection settings for one LLM backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL (or full chat URL for Ollama)
    pub base_url: String,

    /// API key sent as a bearer token; empty means no auth header
    pub api_key: String,

    /// Model name; empty means the field is omitted where the backend allows it
    pub model: String,
}

impl EndpointConfig {
    fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

/// PaperBrief application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend identifier used when none is given on the command line
    pub llm_backend: String,

    /// Hosted OpenAI chat-completions API
    pub openai: EndpointConfig,

    /// FuelIX OpenAI-compatible proxy
    pub fuelix: EndpointConfig,

    /// LM Studio local server (OpenAI-compatible, no auth, no model)
    pub local: EndpointConfig,

    /// Ollama chat endpoint
    pub ollama: EndpointConfig,

    /// Per-request timeout in seconds, 0 disables it
    pub request_timeout_secs: u64,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm_backend: "openai".to_string(),
            openai: EndpointConfig::new("https://api.openai.com/v1", "", "gpt-4o-mini"),
            fuelix: EndpointConfig::new("https://proxy.fuelix.ai", "", ""),
            local: EndpointConfig::new("http://localhost:1234/v1", "", ""),
            ollama: EndpointConfig::new("http://localhost:11434/api/chat", "", "mistral"),
            request_timeout_secs: 300,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, PaperBriefError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PaperBriefError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let request_timeout_secs = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                PaperBriefError::config(format!("LLM_TIMEOUT_SECS must be a whole number, got '{}'", raw))
            })?,
            None => defaults.request_timeout_secs,
        };

        let config = Self {
            llm_backend: var("LLM_BACKEND", &defaults.llm_backend),
            openai: EndpointConfig {
                base_url: var("OPENAI_API_URL", &defaults.openai.base_url),
                api_key: var("OPENAI_API_KEY", &defaults.openai.api_key),
                model: var("OPENAI_MODEL", &defaults.openai.model),
            },
            fuelix: EndpointConfig {
                base_url: var("FUELIX_API_URL", &defaults.fuelix.base_url),
                api_key: var("FUELIX_API_KEY", &defaults.fuelix.api_key),
                model: var("FUELIX_MODEL", &defaults.fuelix.model),
            },
            local: EndpointConfig {
                base_url: var("LM_STUDIO_API_URL", &defaults.local.base_url),
                ..defaults.local.clone()
            },
            ollama: EndpointConfig {
                base_url: var("OLLAMA_API_URL", &defaults.ollama.base_url),
                model: var("OLLAMA_MODEL", &defaults.ollama.model),
                ..defaults.ollama.clone()
            },
            request_timeout_secs,
            log_dir: lookup("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: var("LOG_LEVEL", &defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Request timeout, `None` when disabled
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), PaperBriefError> {
        let endpoints = [
            ("OPENAI_API_URL", &self.openai),
            ("FUELIX_API_URL", &self.fuelix),
            ("LM_STUDIO_API_URL", &self.local),
            ("OLLAMA_API_URL", &self.ollama),
        ];

        for (key, endpoint) in endpoints {
            if !endpoint.base_url.starts_with("http://") && !endpoint.base_url.starts_with("https://") {
                return Err(PaperBriefError::config(format!(
                    "{} must start with http:// or https://, got '{}'",
                    key, endpoint.base_url
                )));
            }
        }

        if self.log_level.trim().is_empty() {
            return Err(PaperBriefError::config("Log level cannot be empty"));
        }

        Ok(())
    }
}
