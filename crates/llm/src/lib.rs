//! PaperBrief LLM Integration
//!
//! Chat clients for the supported summarization backends

mod backend;
mod http;
mod llm_trait;
mod ollama;
mod openai;
mod prompts;
mod types;

pub use backend::{AnyBackend, Backend};
pub use llm_trait::Summarize;
pub use ollama::OllamaClient;
pub use openai::ChatCompletionsClient;
pub use prompts::{summary_conversation, user_prompt, SYSTEM_PROMPT};
pub use types::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OllamaChatRequest,
    OllamaChatResponse, ResponseMessage, Role, MAX_TOKENS, TEMPERATURE,
};
