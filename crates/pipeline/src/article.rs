use serde::{Deserialize, Serialize};
use std::path::Path;

/// One paper handed over by document discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Paper title, used in prompts
    pub title: String,

    pub pdf_link: String,

    pub abstract_link: String,

    pub article_id: String,

    /// Path to the downloaded PDF on local disk (not its content)
    pub pdf_content: String,

    /// Generated summary; empty means none
    #[serde(default)]
    pub summary: String,
}

impl Article {
    /// Create an article without a summary
    pub fn new(
        title: impl Into<String>,
        pdf_link: impl Into<String>,
        abstract_link: impl Into<String>,
        article_id: impl Into<String>,
        pdf_content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            pdf_link: pdf_link.into(),
            abstract_link: abstract_link.into(),
            article_id: article_id.into(),
            pdf_content: pdf_content.into(),
            summary: String::new(),
        }
    }

    /// Local PDF path
    pub fn pdf_path(&self) -> &Path {
        Path::new(&self.pdf_content)
    }

    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }
}
