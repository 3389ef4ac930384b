use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use lekha::api::router::api_router;
use lekha::api::types::ApiContext;
use lekha::config;
use lekha::db::DocumentStore;
use lekha::pipeline::detect::HttpRegionDetector;
use lekha::pipeline::orchestrator::DocumentPipeline;
use lekha::pipeline::vision::OllamaVisionClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    for dir in config::required_dirs() {
        std::fs::create_dir_all(&dir)?;
    }

    let store = Arc::new(DocumentStore::new(config::database_path())?);

    let vision = OllamaVisionClient::new(
        &config::vision_base_url(),
        &config::vision_model(),
        config::vision_timeout_secs(),
    )?;
    let pipeline = Arc::new(DocumentPipeline::new(Arc::new(vision)));

    let detector = HttpRegionDetector::new(
        &config::detector_base_url(),
        config::stamps_dir(),
        config::signatures_dir(),
        60,
    )?;

    let ctx = ApiContext::new(
        store,
        pipeline,
        Arc::new(detector),
        config::uploads_dir(),
        config::stamps_dir(),
        config::signatures_dir(),
        config::exports_dir(),
    );

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config::port()));
    tracing::info!(%addr, model = %config::vision_model(), "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, api_router(ctx)).await?;

    Ok(())
}
