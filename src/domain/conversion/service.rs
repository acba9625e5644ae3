use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sha2::{Digest, Sha256};

use super::error::ConversionError;
use crate::domain::document::{DocumentFormat, Extractor};
use crate::domain::synthesis::SynthesisOrchestrator;
use crate::domain::text;
use crate::domain::voice::VoiceCatalog;
use crate::infrastructure::speech::SpeechBackend;
use crate::infrastructure::staging::Staging;

/// One conversion attempt: the uploaded bytes with their declared content
/// type, plus the caller's language and voice selections.
#[derive(Debug)]
pub struct ConversionRequest {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub language: String,
    pub voice: String,
}

#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub audio: Vec<u8>,
    pub language_code: String,
    pub host_tag: String,
    pub char_count: usize,
}

/// Runs the document-to-audio pipeline: classify, extract, normalize,
/// resolve, synthesize. Strictly sequential; every stage either hands its
/// output to the next stage or ends the request with a typed outcome.
pub struct ConversionService {
    extractor: Extractor,
    catalog: Arc<VoiceCatalog>,
    orchestrator: SynthesisOrchestrator,
    extraction_cache: Option<Cache<String, String>>,
}

impl ConversionService {
    pub fn new(
        backend: Arc<dyn SpeechBackend>,
        catalog: Arc<VoiceCatalog>,
        staging: Arc<Staging>,
        cache_enabled: bool,
    ) -> Self {
        // DOCX and EPUB extraction is pure in the input bytes, so repeated
        // uploads of the same file can reuse the extracted text.
        let extraction_cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self {
            extractor: Extractor::new(staging.clone()),
            catalog,
            orchestrator: SynthesisOrchestrator::new(backend, staging),
            extraction_cache,
        }
    }

    pub async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        tracing::info!(
            content_type = %request.content_type,
            document_size = request.bytes.len(),
            language = %request.language,
            voice = %request.voice,
            "conversion request"
        );

        // 1. Classify the declared content type
        let Some(format) = DocumentFormat::from_content_type(&request.content_type) else {
            tracing::warn!(content_type = %request.content_type, "unsupported document type");
            return Err(ConversionError::UnsupportedFormat(request.content_type));
        };

        // 2. Extract text, memoized for the container formats
        let extracted = self.extract(request.bytes, format).await?;

        // 3. Normalize whitespace
        let normalized = text::normalize(&extracted);
        let char_count = normalized.chars().count();

        tracing::info!(
            extracted_chars = extracted.len(),
            normalized_chars = normalized.len(),
            "text normalized"
        );

        // 4. An empty result is "nothing to synthesize", reported apart
        // from extraction failure; the backend is never contacted for it.
        if normalized.is_empty() {
            return Err(ConversionError::EmptyExtraction);
        }

        // 5. Resolve the selection pair against the catalogs
        let config = self.catalog.resolve(&request.language, &request.voice)?;

        // 6. Synthesize
        let artifact = self
            .orchestrator
            .synthesize(&normalized, &config)
            .await?
            .ok_or(ConversionError::EmptyExtraction)?;

        Ok(ConversionResult {
            audio: artifact.bytes,
            language_code: config.language_code,
            host_tag: config.host_tag,
            char_count,
        })
    }

    /// Extraction itself is CPU-bound file parsing, so it runs on the
    /// blocking pool. Cache hits skip it entirely.
    async fn extract(
        &self,
        bytes: Vec<u8>,
        format: DocumentFormat,
    ) -> Result<String, ConversionError> {
        let cache_key = match (&self.extraction_cache, format) {
            (Some(_), DocumentFormat::Docx | DocumentFormat::Epub) => {
                let digest = Sha256::digest(&bytes);
                let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
                Some(format!("{}:{}", format, hex))
            }
            _ => None,
        };

        if let (Some(cache), Some(key)) = (&self.extraction_cache, &cache_key) {
            if let Some(cached) = cache.get(key).await {
                tracing::info!(format = %format, "extraction cache hit");
                return Ok(cached);
            }
        }

        let extractor = self.extractor.clone();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(&bytes, format))
            .await
            .map_err(|e| {
                ConversionError::Extraction(crate::domain::document::ExtractionError::ParseError(
                    format!("extraction task failed: {}", e),
                ))
            })??;

        if let (Some(cache), Some(key)) = (&self.extraction_cache, cache_key) {
            cache.insert(key, extracted.clone()).await;
        }

        Ok(extracted)
    }
}
