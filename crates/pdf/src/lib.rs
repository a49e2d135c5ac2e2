//! PaperBrief PDF Text Extraction
//!
//! Page-ordered text extraction with a fixed character budget

mod extractor;

pub use extractor::{extract_text, truncate_chars, PdfExtractor, TextExtractor, MAX_TEXT_CHARS};
