use crate::infrastructure::speech::SpeechBackendError;

/// Synthesis failures as the conversion pipeline reports them. The backend
/// diagnostic is carried through verbatim in every variant; it is the only
/// clue a caller gets for a refused language/voice combination.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("speech backend rejected the request: {0}")]
    BackendRejected(String),

    #[error("speech backend timed out: {0}")]
    Timeout(String),

    #[error("speech backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl From<SpeechBackendError> for SynthesisError {
    fn from(err: SpeechBackendError) -> Self {
        match err {
            SpeechBackendError::Rejected(msg) => SynthesisError::BackendRejected(msg),
            SpeechBackendError::Timeout(msg) => SynthesisError::Timeout(msg),
            SpeechBackendError::Unavailable(msg) => SynthesisError::BackendUnavailable(msg),
        }
    }
}
