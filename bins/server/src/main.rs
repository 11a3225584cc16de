//! imgdrop API Server
//!
//! Main entry point for the image upload service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgdrop_api::{AppState, create_router};
use imgdrop_core::storage::OpendalBlobSink;
use imgdrop_core::upload::{ImageUploadService, UploadPolicy};
use imgdrop_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgdrop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    let storage = Arc::new(config.storage);
    let sink = OpendalBlobSink::new(storage.provider.clone());
    info!(
        provider = sink.provider_name(),
        account = %storage.account_name,
        container = %storage.image_container,
        "Blob storage configured"
    );
    if !storage.has_credentials() || !storage.has_container() {
        warn!("Storage configuration is incomplete; uploads will be rejected");
    }

    let policy = UploadPolicy::from(&config.upload);
    info!(
        max_width = policy.limits.max_width,
        max_height = policy.limits.max_height,
        enforce_dimensions = policy.enforce_dimensions,
        "Upload policy configured"
    );

    // Create application state
    let state = AppState {
        uploads: Arc::new(ImageUploadService::new(storage, Arc::new(sink), policy)),
    };

    // Create router
    let app = create_router(state, config.upload.max_request_bytes);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
