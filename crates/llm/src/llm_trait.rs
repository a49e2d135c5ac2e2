use async_trait::async_trait;
use paperbrief_common::Result;

/// Common trait for summarization backends
#[async_trait]
pub trait Summarize: Send + Sync {
    /// Summarize a paper from its title and extracted text
    async fn summarize(&self, title: &str, text: &str) -> Result<String>;

    /// Backend name used in log lines
    fn name(&self) -> &str;
}
