use dotenvy::dotenv;
use plan2scene_backend::app;
use plan2scene_backend::config::settings::AppConfig;
use plan2scene_backend::infrastructure::memory::job_store::JobStore;
use plan2scene_backend::infrastructure::storage::local::{LocalStorage, SAMPLE_VIDEO};
use plan2scene_backend::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new()?;
    let storage = LocalStorage::new(&config.upload_dir, &config.files_dir).await?;

    if !storage.has_sample_video().await {
        warn!(
            "{} is missing from {}, video links will be broken",
            SAMPLE_VIDEO,
            storage.files_dir().display()
        );
    }

    let addr = format!("{}:{}", config.host, config.port);
    info!("Public base URL: {}", config.public_base_url);
    info!(
        "Raw uploads in {}, serving {}",
        storage.upload_dir().display(),
        storage.files_dir().display()
    );

    let state = AppState::new(config, storage, JobStore::new());
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
