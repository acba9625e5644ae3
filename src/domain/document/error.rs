/// Typed extraction failures, one per way a document can defeat its parser.
///
/// Each variant carries the originating library diagnostic so the caller can
/// surface it; an empty extraction result is deliberately NOT an error and
/// is reported separately by the conversion service.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("document could not be opened, it may be secured or corrupt: {0}")]
    CorruptOrSecured(String),

    #[error("document is not valid UTF-8 text: {0}")]
    DecodeError(String),

    #[error("document container is malformed: {0}")]
    ParseError(String),
}
