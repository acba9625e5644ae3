use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{SpeechBackend, SpeechBackendError};

/// The translate host rejects long query strings, so text is chunked on
/// sentence boundaries before requesting.
const MAX_CHUNK_CHARS: usize = 200;

/// Speech backend speaking the Google Translate TTS wire protocol.
///
/// Accent selection rides on the regional host: the resolved host tag is
/// substituted into the host template ("translate.google.co.uk" sounds
/// different from "translate.google.com" for the same language code).
pub struct GoogleTranslateBackend {
    client: reqwest::Client,
    host_template: String,
    catalog_url: String,
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    /// Target-language table of the catalog payload; the source-language
    /// half is irrelevant for synthesis.
    #[serde(default)]
    tl: HashMap<String, String>,
}

impl GoogleTranslateBackend {
    /// `host_template` contains a `{tld}` placeholder for the regional host
    /// tag, e.g. `https://translate.google.{tld}`. Tests point both URLs at
    /// a local mock server.
    pub fn new(
        host_template: String,
        catalog_url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            host_template,
            catalog_url,
        })
    }

    async fn request_chunk(
        &self,
        base: &str,
        chunk: &str,
        language_code: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SpeechBackendError> {
        let url = format!(
            "{}/translate_tts?ie=UTF-8&client=tw-ob&tl={}&total={}&idx={}&textlen={}&q={}",
            base,
            language_code,
            total,
            idx,
            chunk.chars().count(),
            urlencoding::encode(chunk),
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_client_error() {
            // The rejection body is the only diagnostic the provider gives
            // for bad language/voice combinations; keep it intact.
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechBackendError::Rejected(format!("{}: {}", status, body)));
        }
        if !status.is_success() {
            return Err(SpeechBackendError::Unavailable(format!(
                "backend returned {}",
                status
            )));
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechBackend for GoogleTranslateBackend {
    async fn list_languages(&self) -> Result<HashMap<String, String>, SpeechBackendError> {
        let response = self
            .client
            .get(&self.catalog_url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechBackendError::Unavailable(format!(
                "catalog fetch returned {}",
                status
            )));
        }

        let catalog: CatalogResponse = response
            .json()
            .await
            .map_err(|e| SpeechBackendError::Unavailable(e.to_string()))?;

        Ok(catalog.tl)
    }

    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
        host_tag: &str,
    ) -> Result<Vec<u8>, SpeechBackendError> {
        let start_time = std::time::Instant::now();
        let base = self.host_template.replace("{tld}", host_tag);

        let chunks = split_into_chunks(text);
        tracing::info!(
            chunk_count = chunks.len(),
            text_length = text.len(),
            language = language_code,
            host_tag = host_tag,
            "text split into synthesis chunks"
        );

        // Chunks are requested and merged strictly in document order; MP3
        // frames concatenate cleanly.
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let chunk_audio = self
                .request_chunk(&base, chunk, language_code, idx, chunks.len())
                .await?;
            audio.extend_from_slice(&chunk_audio);

            tracing::debug!(
                chunk_index = idx,
                chunk_size = chunk.len(),
                total_audio_size = audio.len(),
                "chunk synthesized and merged"
            );
        }

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "google-translate",
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            chunk_count = chunks.len(),
            audio_size_bytes = audio.len(),
            "speech synthesis completed"
        );

        Ok(audio)
    }
}

fn map_transport_error(e: reqwest::Error) -> SpeechBackendError {
    if e.is_timeout() {
        SpeechBackendError::Timeout(e.to_string())
    } else {
        SpeechBackendError::Unavailable(e.to_string())
    }
}

/// Split text into chunks that respect sentence boundaries.
/// Each chunk is at most MAX_CHUNK_CHARS characters.
fn split_into_chunks(text: &str) -> Vec<String> {
    if text.len() <= MAX_CHUNK_CHARS {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current_chunk = String::new();

    // Split on sentence-ending punctuation
    let sentence_pattern = regex::Regex::new(r"([.!?]+\s+)").unwrap();
    let mut last_end = 0;

    for mat in sentence_pattern.find_iter(text) {
        let sentence = &text[last_end..mat.end()];

        // If adding this sentence would exceed the limit, save current chunk
        if !current_chunk.is_empty() && current_chunk.len() + sentence.len() > MAX_CHUNK_CHARS {
            chunks.push(current_chunk.trim().to_string());
            current_chunk = String::new();
        }

        current_chunk.push_str(sentence);
        last_end = mat.end();
    }

    // Handle remaining text after last sentence boundary
    if last_end < text.len() {
        let remaining = &text[last_end..];

        if !current_chunk.is_empty() && current_chunk.len() + remaining.len() > MAX_CHUNK_CHARS {
            chunks.push(current_chunk.trim().to_string());
            current_chunk = String::new();
        }

        // If remaining text itself is too large, split it by characters
        if remaining.len() > MAX_CHUNK_CHARS {
            let chars: Vec<char> = remaining.chars().collect();
            for chunk in chars.chunks(MAX_CHUNK_CHARS) {
                chunks.push(chunk.iter().collect());
            }
        } else {
            current_chunk.push_str(remaining);
        }
    }

    if !current_chunk.is_empty() {
        chunks.push(current_chunk.trim().to_string());
    }

    chunks
}
