//! Text extraction from various file formats

use crate::error::{ExtractionError, Result, ResumeMatcherError};
use log::debug;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract the text of every page, joined by newlines and trimmed.
    pub fn extract_bytes(&self, bytes: &[u8]) -> std::result::Result<String, ExtractionError> {
        let document = pdf_extract::Document::load_mem(bytes)
            .map_err(|e| ExtractionError::Unparseable(e.to_string()))?;

        // The trailer /Encrypt entry must resolve to an encryption dictionary
        if document.is_encrypted() {
            return Err(ExtractionError::Encrypted);
        }

        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(ExtractionError::NoPages);
        }

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            let mut text = String::new();
            let mut output = pdf_extract::PlainTextOutput::new(&mut text);
            pdf_extract::output_doc_page(&document, &mut output, page_number)
                .map_err(|e| ExtractionError::Unparseable(e.to_string()))?;
            drop(output);
            pages.push(text.trim().to_string());
        }
        debug!("Extracted {} PDF pages", pages.len());

        Ok(pages.join("\n").trim().to_string())
    }
}

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        self.extract_bytes(&bytes).map_err(ResumeMatcherError::from)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content.trim().to_string())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(self.markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    pub fn markdown_to_text(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        self.html_to_text(&html_output)
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n");
        let clean_text = HTML_TAG.replace_all(&text, "");
        let clean_text = clean_text
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
