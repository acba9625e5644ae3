pub mod request_id;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{catalog::CatalogController, convert::ConvertController, health};
use crate::domain::voice::VoiceCatalog;
use crate::infrastructure::config::Config;
use request_id::request_id_middleware;

/// Uploads above this limit are rejected at the transport layer, before the
/// multipart body is buffered.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Assemble the full application router. Kept separate from serving so
/// integration tests can drive it without binding a socket.
pub fn app_router(
    catalog: Arc<VoiceCatalog>,
    convert_controller: Arc<ConvertController>,
    catalog_controller: Arc<CatalogController>,
) -> Router {
    let convert_routes = Router::new()
        .route("/api/convert", post(ConvertController::convert))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(convert_controller);

    let catalog_routes = Router::new()
        .route("/api/languages", get(CatalogController::languages))
        .route("/api/voices", get(CatalogController::voices))
        .with_state(catalog_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(catalog)
        .merge(convert_routes)
        .merge(catalog_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    catalog: Arc<VoiceCatalog>,
    convert_controller: Arc<ConvertController>,
    catalog_controller: Arc<CatalogController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = app_router(catalog, convert_controller, catalog_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
