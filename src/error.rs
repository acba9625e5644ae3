use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::conversion::ConversionError;
use crate::domain::synthesis::SynthesisError;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedMedia(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Text too large: {0}")]
    PayloadTooLarge(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("External service timed out: {0}")]
    GatewayTimeout(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure - simplified to just message + status code
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ExternalService(_) => StatusCode::BAD_GATEWAY,
            Self::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to simplified error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.to_string(),
        }
    }
}

/// Map each conversion outcome onto a distinct, category-labeled message so
/// "could not read your file", "no text in your file" and "could not
/// generate audio" stay distinguishable for the caller.
impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnsupportedFormat(content_type) => {
                AppError::UnsupportedMedia(content_type)
            }
            ConversionError::EmptyExtraction => {
                AppError::Unprocessable("Could not read any text from your file".to_string())
            }
            ConversionError::Extraction(e) => {
                AppError::Unprocessable(format!("Could not read your file: {}", e))
            }
            ConversionError::Resolution(e) => AppError::BadRequest(e.to_string()),
            ConversionError::Synthesis(SynthesisError::Timeout(msg)) => {
                AppError::GatewayTimeout(format!("Could not generate audio: {}", msg))
            }
            ConversionError::Synthesis(e) => {
                AppError::ExternalService(format!("Could not generate audio: {}", e))
            }
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error
        let status = self.status_code();
        tracing::error!(
            error = %self,
            status = %status.as_u16(),
            "Request failed"
        );

        // Create simplified error response
        let error_response = self.to_response();

        (status, Json(error_response)).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
