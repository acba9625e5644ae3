use std::io::{Cursor, Read};
use std::sync::Arc;

use epub::doc::EpubDoc;
use lopdf::Document;
use regex::Regex;
use zip::ZipArchive;

use super::error::ExtractionError;
use super::format::DocumentFormat;
use crate::infrastructure::staging::Staging;

/// Turns uploaded document bytes into best-effort plain text.
///
/// Extraction is a pure function of the input bytes for every format; the
/// EPUB variant additionally needs filesystem staging because its parser
/// reads from a path rather than a stream. An empty result is valid output
/// (a readable document with no text), never an error.
#[derive(Clone)]
pub struct Extractor {
    staging: Arc<Staging>,
}

impl Extractor {
    pub fn new(staging: Arc<Staging>) -> Self {
        Self { staging }
    }

    pub fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
        let text = match format {
            DocumentFormat::Pdf => Self::extract_pdf(bytes)?,
            DocumentFormat::Txt => Self::extract_txt(bytes)?,
            DocumentFormat::Docx => Self::extract_docx(bytes)?,
            DocumentFormat::Epub => self.extract_epub(bytes)?,
        };

        tracing::info!(
            format = %format,
            input_size = bytes.len(),
            extracted_chars = text.len(),
            "document text extracted"
        );

        Ok(text)
    }

    /// Concatenates per-page text with a separating newline. Pages yielding
    /// no recoverable text contribute nothing; only a document that cannot
    /// be opened at all is an error.
    fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| ExtractionError::CorruptOrSecured(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(ExtractionError::CorruptOrSecured(
                "document is password protected".to_string(),
            ));
        }

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => {
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        pages.push(text);
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        page = page_number,
                        error = %e,
                        "page yielded no extractable text"
                    );
                }
            }
        }

        Ok(pages.join("\n"))
    }

    fn extract_txt(bytes: &[u8]) -> Result<String, ExtractionError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError::DecodeError(e.to_string()))
    }

    /// Reads paragraph text runs out of the OOXML main document part and
    /// keeps only non-blank paragraphs, joined with newlines.
    fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::ParseError(e.to_string()))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractionError::ParseError(format!("missing word/document.xml: {}", e)))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractionError::ParseError(e.to_string()))?;

        let run_pattern = Regex::new(r"<w:t(?: [^>]*)?>([^<]*)</w:t>").unwrap();
        let mut paragraphs = Vec::new();
        for paragraph in xml.split("</w:p>") {
            let text: String = run_pattern
                .captures_iter(paragraph)
                .map(|c| unescape_xml(&c[1]))
                .collect();
            let text = text.trim().to_string();
            if !text.is_empty() {
                paragraphs.push(text);
            }
        }

        Ok(paragraphs.join("\n"))
    }

    /// Walks spine items in document order, keeps only document-type items,
    /// and strips markup with a plain between-angle-brackets filter. Invalid
    /// UTF-8 inside an item is substituted rather than failing the item.
    fn extract_epub(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // The parser wants a path, so the upload is staged to disk for the
        // duration of this call; the guard removes it on every exit path.
        let staged = self
            .staging
            .stage_bytes("epub", bytes)
            .map_err(|e| ExtractionError::ParseError(format!("could not stage archive: {}", e)))?;

        let mut doc = EpubDoc::new(staged.path())
            .map_err(|e| ExtractionError::ParseError(e.to_string()))?;

        let tag_pattern = Regex::new(r"<[^>]*>").unwrap();
        let mut sections = Vec::new();
        for page in 0..doc.get_num_pages() {
            doc.set_current_page(page);
            let Some((content, mime)) = doc.get_current() else {
                continue;
            };
            if mime != "application/xhtml+xml" && mime != "text/html" {
                continue;
            }
            let markup = String::from_utf8_lossy(&content);
            sections.push(tag_pattern.replace_all(&markup, "").into_owned());
        }

        Ok(sections.join("\n"))
    }
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
