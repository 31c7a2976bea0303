//! SilicoQuest API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use silicoquest_api::config::ServerConfig;
use silicoquest_api::error::AppError;
use silicoquest_api::host::{ClientGameHost, LoggingRenderer};
use silicoquest_api::state::AppState;
use silicoquest_catalog::ChapterCatalog;
use silicoquest_catalog::application::loader::{builtin_catalog, load_catalog_file};
use silicoquest_core::clock::SystemClock;
use silicoquest_core::store::ProgressStore;
use silicoquest_narrative::{ControllerConfig, ProgressionController};
use silicoquest_progress_store::json_file_store::JsonFileProgressStore;
use silicoquest_progress_store::memory_store::InMemoryProgressStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting SilicoQuest API server");

    let config = ServerConfig::from_env()?;

    let catalog: Arc<ChapterCatalog> = Arc::new(match &config.catalog_path {
        Some(path) => load_catalog_file(path)?,
        None => builtin_catalog()?,
    });

    let store: Arc<dyn ProgressStore> = match &config.progress_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "persisting progress to file");
            Arc::new(JsonFileProgressStore::new(path.clone()))
        }
        None => {
            tracing::warn!("SILICOQUEST_PROGRESS_PATH is empty; progress is kept in memory");
            Arc::new(InMemoryProgressStore::new())
        }
    };

    let controller = ProgressionController::new(
        Arc::clone(&catalog),
        store,
        Box::new(ClientGameHost::new()),
        Box::new(LoggingRenderer),
        Arc::new(SystemClock),
        ControllerConfig {
            notice_ttl_ms: config.notice_ttl_ms(),
        },
    );
    let app_state = AppState::new(controller, catalog);

    // Periodic save so time spent in a chapter survives a crash.
    if let Some(every) = config.autosave_interval {
        let autosave_state = app_state.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                autosave_state.controller().persist();
            }
        });
    }

    let app = silicoquest_api::app(app_state.clone());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if app_state.controller().persist() {
        tracing::info!("progress saved on shutdown");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
