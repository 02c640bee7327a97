use std::sync::Arc;

use anyhow::Context;
use shared::observability::init_logging_from_env;
use upload_service::{config::Config, router, storage::S3Storage, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry logging settings as well as storage credentials
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env file: {}", e);
        }
    }

    init_logging_from_env("upload-service")?;

    tracing::info!("Starting Upload Service...");

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Refusing to start: {}", e);
        e
    })?;
    tracing::debug!("Loaded configuration: {:?}", config);

    // Initialize S3 client
    let storage = S3Storage::new(&config.storage).await;
    tracing::info!("S3 client initialized successfully");

    let state = AppState {
        storage: Arc::new(storage),
    };
    let app = router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Upload Service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
