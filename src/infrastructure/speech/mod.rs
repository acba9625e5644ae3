pub mod google;

pub use google::GoogleTranslateBackend;

use async_trait::async_trait;
use std::collections::HashMap;

/// Abstraction over the remote speech synthesis service.
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into chunks if needed
/// - Merging audio chunks into a single MP3 stream in document order
/// - Addressing the provider's regional host for the requested accent
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Fetch the provider's full language catalog (code -> display name).
    /// Called once at process start to seed the curated selection tables.
    async fn list_languages(&self) -> Result<HashMap<String, String>, SpeechBackendError>;

    /// Synthesize text to speech.
    ///
    /// # Arguments
    /// * `text` - Normalized text (no markup, collapsed whitespace), non-empty
    /// * `language_code` - Resolved language code, e.g. "en"
    /// * `host_tag` - Resolved regional host identifier, e.g. "co.uk"
    ///
    /// Returns merged MP3 audio data ready for playback.
    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
        host_tag: &str,
    ) -> Result<Vec<u8>, SpeechBackendError>;
}

/// Transport-level view of what went wrong at the provider.
#[derive(Debug, thiserror::Error)]
pub enum SpeechBackendError {
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    #[error("backend request timed out: {0}")]
    Timeout(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
