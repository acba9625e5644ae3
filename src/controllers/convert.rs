use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
};
use std::sync::Arc;

use crate::{
    domain::conversion::{ConversionRequest, ConversionService},
    domain::voice::catalog::{DEFAULT_LANGUAGE_LABEL, DEFAULT_VOICE_LABEL},
    error::{AppError, AppResult},
};

/// Documents past this size are refused before any parsing happens.
const MAX_DOCUMENT_BYTES: usize = 20 * 1024 * 1024;

pub struct ConvertController {
    conversion_service: Arc<ConversionService>,
}

impl ConvertController {
    pub fn new(conversion_service: Arc<ConversionService>) -> Self {
        Self { conversion_service }
    }

    /// POST /api/convert - Convert an uploaded document to spoken audio
    ///
    /// Multipart parts: `document` (required file, its declared content type
    /// selects the extractor), `language` and `voice` (optional selections,
    /// defaulted).
    pub async fn convert(
        State(controller): State<Arc<ConvertController>>,
        mut multipart: Multipart,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let mut document: Option<(Vec<u8>, String)> = None;
        let mut language = DEFAULT_LANGUAGE_LABEL.to_string();
        let mut voice = DEFAULT_VOICE_LABEL.to_string();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {}", e)))?
        {
            let name = field.name().map(|s| s.to_string());
            match name.as_deref() {
                Some("document") => {
                    let content_type = field
                        .content_type()
                        .map(|s| s.to_string())
                        .ok_or_else(|| {
                            AppError::BadRequest(
                                "document part must declare a content type".to_string(),
                            )
                        })?;
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(format!("could not read document part: {}", e))
                    })?;
                    document = Some((bytes.to_vec(), content_type));
                }
                Some("language") => {
                    language = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("could not read language part: {}", e))
                    })?;
                }
                Some("voice") => {
                    voice = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("could not read voice part: {}", e))
                    })?;
                }
                _ => {}
            }
        }

        let (bytes, content_type) = document
            .ok_or_else(|| AppError::BadRequest("missing document part".to_string()))?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("document is empty".to_string()));
        }
        if bytes.len() > MAX_DOCUMENT_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "document must be {} bytes or less",
                MAX_DOCUMENT_BYTES
            )));
        }

        let result = controller
            .conversion_service
            .convert(ConversionRequest {
                bytes,
                content_type,
                language,
                voice,
            })
            .await
            .map_err(AppError::from)?;

        // Build headers
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "audio/mpeg".parse().unwrap());
        headers.insert(
            "X-Character-Count",
            result.char_count.to_string().parse().unwrap(),
        );
        headers.insert("X-Language", result.language_code.parse().unwrap());
        headers.insert("X-Voice", result.host_tag.parse().unwrap());

        Ok((StatusCode::OK, headers, Body::from(result.audio)))
    }
}
