use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::voice::{LanguageOption, VoiceCatalog, VoiceOption};

/// Serves the selection tables the conversion endpoint validates against,
/// so clients can populate their pickers from the same source of truth.
pub struct CatalogController {
    catalog: Arc<VoiceCatalog>,
}

impl CatalogController {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    /// GET /api/languages - Curated output languages
    pub async fn languages(
        State(controller): State<Arc<CatalogController>>,
    ) -> Json<Vec<LanguageOption>> {
        Json(controller.catalog.languages().to_vec())
    }

    /// GET /api/voices - Voice/accent variants
    pub async fn voices(
        State(controller): State<Arc<CatalogController>>,
    ) -> Json<Vec<VoiceOption>> {
        Json(controller.catalog.voices().to_vec())
    }
}
