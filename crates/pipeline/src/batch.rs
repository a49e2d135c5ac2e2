use paperbrief_common::{AppConfig, ErrorKind, PaperBriefError, Result};
use paperbrief_llm::{AnyBackend, Backend, Summarize};
use paperbrief_pdf::{extract_text, truncate_chars, PdfExtractor, TextExtractor};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::article::Article;

/// What happened to one article during a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleOutcome {
    /// Backend produced a summary
    Summarized,
    /// PDF missing on disk, summary left untouched
    Skipped,
    /// Extraction or generation failed
    Failed(ErrorKind),
}

/// Articles returned from a batch run together with their outcomes
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub articles: Vec<Article>,
    pub outcomes: Vec<ArticleOutcome>,
}

impl BatchReport {
    pub fn summarized(&self) -> usize {
        self.count(|o| matches!(o, ArticleOutcome::Summarized))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ArticleOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ArticleOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&ArticleOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Summarizes articles one after another, isolating failures per article
pub struct BatchProcessor {
    extractor: Arc<dyn TextExtractor>,
    backend: Arc<dyn Summarize>,
}

impl BatchProcessor {
    /// Create new batch processor
    pub fn new(extractor: Arc<dyn TextExtractor>, backend: Arc<dyn Summarize>) -> Self {
        Self { extractor, backend }
    }

    /// PDF extraction plus the configured client for `backend`
    pub fn from_config(backend: Backend, config: &AppConfig) -> Result<Self> {
        let client = AnyBackend::from_config(backend, config)?;
        info!(
            "Using {} backend - Endpoint: {}, Model: {}",
            backend,
            client.endpoint(),
            client.model().unwrap_or("<server default>")
        );

        Ok(Self::new(Arc::new(PdfExtractor), Arc::new(client)))
    }

    /// Summarize every article and return them in input order
    pub async fn process(&self, articles: Vec<Article>) -> Vec<Article> {
        self.process_with_report(articles).await.articles
    }

    /// Like [`process`](Self::process), also reporting per-article outcomes
    pub async fn process_with_report(&self, mut articles: Vec<Article>) -> BatchReport {
        info!("Starting summarization - Articles: {}, Backend: {}", articles.len(), self.backend.name());

        let total = articles.len();
        let mut outcomes = Vec::with_capacity(total);
        for (i, article) in articles.iter_mut().enumerate() {
            debug!("Processing article {}/{}", i + 1, total);
            outcomes.push(self.process_article(article).await);
        }

        let report = BatchReport { articles, outcomes };
        info!(
            "Summarization finished - Summarized: {}, Skipped: {}, Failed: {}",
            report.summarized(),
            report.skipped(),
            report.failed()
        );
        report
    }

    /// Process a single article, recording the result in its `summary`
    ///
    /// A missing PDF or empty extraction leaves `summary` as it was; any
    /// other failure clears it.
    pub async fn process_article(&self, article: &mut Article) -> ArticleOutcome {
        let span = info_span!("article", title = %article.title);

        async move {
            match self.summarize_article(article).await {
                Ok(summary) => {
                    debug!("Generated summary using {} for: {}", self.backend.name(), article.title);
                    article.summary = summary;
                    ArticleOutcome::Summarized
                }
                Err(e @ PaperBriefError::MissingFile(_)) => {
                    error!("{}", e);
                    ArticleOutcome::Skipped
                }
                Err(e @ PaperBriefError::Extraction(_)) => {
                    warn!("Skipping generation for {}: {}", article.title, e);
                    ArticleOutcome::Failed(e.kind())
                }
                Err(e) => {
                    error!(kind = %e.kind(), "Error processing {}: {}", article.title, e);
                    article.summary.clear();
                    ArticleOutcome::Failed(e.kind())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn summarize_article(&self, article: &Article) -> Result<String> {
        let path = article.pdf_path().to_path_buf();
        if !path.exists() {
            return Err(PaperBriefError::missing_file(path));
        }

        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extract_text(extractor.as_ref(), &path))
            .await
            .map_err(|e| PaperBriefError::internal(format!("Extraction task failed: {}", e)))?;

        if text.is_empty() {
            return Err(PaperBriefError::extraction(format!(
                "No text extracted from {}",
                article.pdf_content
            )));
        }

        debug!("First 100 chars of extracted text: {}", truncate_chars(&text, 100));

        self.backend.summarize(&article.title, &text).await
    }
}
