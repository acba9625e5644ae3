use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audiobook_backend::controllers::catalog::CatalogController;
use audiobook_backend::controllers::convert::ConvertController;
use audiobook_backend::domain::conversion::ConversionService;
use audiobook_backend::domain::voice::VoiceCatalog;
use audiobook_backend::infrastructure::config::{Config, LogFormat};
use audiobook_backend::infrastructure::http::start_http_server;
use audiobook_backend::infrastructure::speech::{GoogleTranslateBackend, SpeechBackend};
use audiobook_backend::infrastructure::staging::Staging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Audiobook Backend on {}:{}",
        config.host,
        config.port
    );

    // Create the speech backend client
    let backend: Arc<dyn SpeechBackend> = Arc::new(GoogleTranslateBackend::new(
        config.synthesis_host_template.clone(),
        config.catalog_url.clone(),
        Duration::from_secs(config.synthesis_timeout_secs),
    )?);
    tracing::info!(
        timeout_secs = config.synthesis_timeout_secs,
        "speech backend client initialized"
    );

    // Fetch and filter the language catalog once at startup; a failed fetch
    // degrades to the guaranteed default language.
    let catalog = Arc::new(VoiceCatalog::load(backend.as_ref()).await);
    tracing::info!(
        languages = catalog.languages().len(),
        voices = catalog.voices().len(),
        "voice catalog ready"
    );

    let staging = Arc::new(Staging::new(config.staging_dir.clone()));
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate services (inject backend, catalog and staging)
    tracing::info!("Instantiating services...");
    let conversion_service = Arc::new(ConversionService::new(
        backend.clone(),
        catalog.clone(),
        staging.clone(),
        config.extraction_cache_enabled,
    ));

    // 2. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let convert_controller = Arc::new(ConvertController::new(conversion_service));
    let catalog_controller = Arc::new(CatalogController::new(catalog.clone()));

    // Start HTTP server with all routes
    start_http_server(config, catalog, convert_controller, catalog_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "audiobook_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "audiobook_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
