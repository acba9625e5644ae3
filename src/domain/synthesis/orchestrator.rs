use std::sync::Arc;

use super::error::SynthesisError;
use crate::domain::voice::VoiceConfig;
use crate::infrastructure::speech::SpeechBackend;
use crate::infrastructure::staging::Staging;

/// Playable audio produced for one conversion request. Owned by the caller
/// once returned; nothing is kept server-side.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub bytes: Vec<u8>,
}

/// Drives one synthesis round-trip against the speech backend.
///
/// The produced audio passes through a staged temporary file before being
/// handed back, and the staging guard removes it whether the request
/// completes, fails or is abandoned mid-flight. No partial audio ever
/// reaches the caller: any chunk failure discards the whole artifact.
pub struct SynthesisOrchestrator {
    backend: Arc<dyn SpeechBackend>,
    staging: Arc<Staging>,
}

impl SynthesisOrchestrator {
    pub fn new(backend: Arc<dyn SpeechBackend>, staging: Arc<Staging>) -> Self {
        Self { backend, staging }
    }

    /// `Ok(None)` is the "nothing to do" outcome for empty text; it is not
    /// an error, and no backend call is made.
    pub async fn synthesize(
        &self,
        text: &str,
        config: &VoiceConfig,
    ) -> Result<Option<AudioArtifact>, SynthesisError> {
        if text.is_empty() {
            tracing::info!("empty text, nothing to synthesize");
            return Ok(None);
        }

        let audio = self
            .backend
            .synthesize(text, &config.language_code, &config.host_tag)
            .await?;

        // Round-trip the artifact through staging; the guard removes the
        // file once the owned copy below exists.
        let staged = self
            .staging
            .stage_bytes("mp3", &audio)
            .map_err(|e| SynthesisError::BackendUnavailable(format!("staging failed: {}", e)))?;
        let bytes = std::fs::read(staged.path())
            .map_err(|e| SynthesisError::BackendUnavailable(format!("staging failed: {}", e)))?;
        drop(staged);

        tracing::info!(
            audio_size = bytes.len(),
            language = %config.language_code,
            host_tag = %config.host_tag,
            "audio artifact ready"
        );

        Ok(Some(AudioArtifact { bytes }))
    }
}
