pub mod error;
pub mod service;

pub use error::ConversionError;
pub use service::{ConversionRequest, ConversionResult, ConversionService};
