pub mod error;
pub mod orchestrator;

pub use error::SynthesisError;
pub use orchestrator::{AudioArtifact, SynthesisOrchestrator};
