#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("unknown language or voice selection: {0}")]
    UnknownSelection(String),
}
