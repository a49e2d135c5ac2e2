//! Prompt templates for paper summarization

use crate::types::ChatMessage;

/// System instruction shared by every backend
pub const SYSTEM_PROMPT: &str = "You are a research assistant that provides concise summaries of academic papers.
Focus on:
1. Key findings and contributions
2. Methodology and approach
3. Main conclusions and implications
4. Respond with a basic string, no formatting, titles, heading etc. is required.";

/// User message carrying the paper title and its extracted text
pub fn user_prompt(title: &str, text: &str) -> String {
    format!(
        "Please summarize this paper:\nTitle: {}\nContent: {}",
        title, text
    )
}

/// Two-message conversation sent to every backend
pub fn summary_conversation(title: &str, text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(user_prompt(title, text)),
    ]
}
