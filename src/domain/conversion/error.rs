use crate::domain::document::ExtractionError;
use crate::domain::synthesis::SynthesisError;
use crate::domain::voice::ResolutionError;

/// Everything a conversion request can terminally end with, short of
/// success. `UnsupportedFormat` and `EmptyExtraction` are warning-class
/// outcomes rather than pipeline faults, but they still end the request;
/// no partial result is ever produced.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("unsupported document type: {0}")]
    UnsupportedFormat(String),

    #[error("no text could be extracted from the document")]
    EmptyExtraction,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}
