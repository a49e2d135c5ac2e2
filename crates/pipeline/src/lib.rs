//! PaperBrief summarization pipeline
//!
//! Runs extraction and summarization over a batch of articles

mod article;
mod batch;

pub use article::Article;
pub use batch::{ArticleOutcome, BatchProcessor, BatchReport};
