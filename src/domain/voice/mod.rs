pub mod catalog;
pub mod error;

pub use catalog::{LanguageOption, VoiceCatalog, VoiceConfig, VoiceOption};
pub use error::ResolutionError;
