use paperbrief_common::{PaperBriefError, Result};
use std::panic;
use std::path::Path;
use tracing::{debug, error};

/// Character budget for text handed to a backend (rough token-limit proxy)
pub const MAX_TEXT_CHARS: usize = 4000;

/// Source of per-page text for a document on disk
pub trait TextExtractor: Send + Sync {
    /// Text of every page, in page order. Pages without text yield an empty string.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// `pdf-extract` backed extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed streams instead of returning an error
        match panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path)) {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(PaperBriefError::extraction(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))),
            Err(_) => Err(PaperBriefError::extraction(format!(
                "PDF parser panicked on {}",
                path.display()
            ))),
        }
    }
}

/// Extract the text of a PDF, truncated to [`MAX_TEXT_CHARS`].
///
/// Never fails: any extraction error is logged and yields an empty string,
/// which callers treat as "nothing to summarize".
pub fn extract_text(extractor: &dyn TextExtractor, path: &Path) -> String {
    match extractor.extract_pages(path) {
        Ok(pages) => {
            let text = pages.concat();
            debug!(
                "Extracted text from {} - Pages: {}, Length: {} chars",
                path.display(),
                pages.len(),
                text.chars().count()
            );
            truncate_chars(&text, MAX_TEXT_CHARS).to_string()
        }
        Err(e) => {
            error!("Error extracting PDF text: {}", e);
            String::new()
        }
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct StubExtractor(Result<Vec<String>>);

    impl TextExtractor for StubExtractor {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<String>> {
            match &self.0 {
                Ok(pages) => Ok(pages.clone()),
                Err(e) => Err(PaperBriefError::extraction(e.to_string())),
            }
        }
    }

    #[test]
    fn test_truncates_to_budget() {
        let stub = StubExtractor(Ok(vec!["a".repeat(5000)]));
        let text = extract_text(&stub, Path::new("paper.pdf"));
        assert_eq!(text, "a".repeat(4000));
    }

    #[test]
    fn test_pages_concatenated_in_order() {
        let stub = StubExtractor(Ok(vec![
            "Abstract. ".to_string(),
            String::new(),
            "Results.".to_string(),
        ]));
        let text = extract_text(&stub, Path::new("paper.pdf"));
        assert_eq!(text, "Abstract. Results.");
    }

    #[test]
    fn test_failure_yields_empty_string() {
        let stub = StubExtractor(Err(PaperBriefError::extraction("corrupt xref")));
        assert_eq!(extract_text(&stub, Path::new("paper.pdf")), "");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        let text = "é".repeat(10);
        let truncated = truncate_chars(&text, 4);
        assert_eq!(truncated, "éééé");
        assert_eq!(truncate_chars("short", 4000), "short");
    }

    #[test]
    fn test_pdf_extractor_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        assert!(PdfExtractor.extract_pages(file.path()).is_err());
        assert_eq!(extract_text(&PdfExtractor, file.path()), "");
    }

    #[test]
    fn test_pdf_extractor_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PdfExtractor.extract_pages(&dir.path().join("absent.pdf")).is_err());
    }

    /// Minimal Helvetica PDF with one page per entry of `page_texts`; `None` is a page without text
    fn build_pdf(page_texts: &[Option<&str>]) -> Vec<u8> {
        let font_id = 3 + 2 * page_texts.len();
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                (0..page_texts.len())
                    .map(|i| format!("{} 0 R", 3 + 2 * i))
                    .collect::<Vec<_>>()
                    .join(" "),
                page_texts.len()
            ),
        ];
        for (i, text) in page_texts.iter().enumerate() {
            let content = match text {
                Some(text) => format!("BT /F1 24 Tf 72 700 Td ({}) Tj ET", text),
                None => "BT ET".to_string(),
            };
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
                font_id,
                4 + 2 * i
            ));
            objects.push(format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content));
        }
        objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_offset = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    #[test]
    fn test_pdf_extractor_reads_pages_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&build_pdf(&[Some("Alpha page"), None, Some("Gamma page")]))
            .unwrap();

        let pages = PdfExtractor.extract_pages(file.path()).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].trim(), "Alpha page");
        assert_eq!(pages[1].trim(), "");
        assert_eq!(pages[2].trim(), "Gamma page");

        let text = extract_text(&PdfExtractor, file.path());
        assert_eq!(text, pages.concat());
        let alpha = text.find("Alpha page").unwrap();
        let gamma = text.find("Gamma page").unwrap();
        assert!(alpha < gamma);
        assert_eq!(text.split_whitespace().collect::<Vec<_>>(), ["Alpha", "page", "Gamma", "page"]);
    }
}
