pub mod conversion;
pub mod document;
pub mod synthesis;
pub mod text;
pub mod voice;
