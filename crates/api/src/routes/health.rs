//! Health check endpoint.
//!
//! Reports `degraded` while the storage account or container is missing, since
//! every upload would then be answered with a 400.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Storage configuration state.
    pub storage: StorageHealth,
}

/// What the service knows about its blob storage without contacting it.
#[derive(Debug, Serialize)]
pub struct StorageHealth {
    /// Configured provider.
    pub provider: &'static str,
    /// Account name and key are both set.
    pub credentials: bool,
    /// Image container is set.
    pub container: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.uploads.storage_config();
    let storage = StorageHealth {
        provider: config.provider.name(),
        credentials: config.has_credentials(),
        container: config.has_container(),
    };
    let status = if storage.credentials && storage.container {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage,
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{body::Body, http::Request, http::StatusCode};
    use bytes::Bytes;
    use http_body_util::BodyExt;
    use imgdrop_core::storage::{BlobLocator, BlobSink, SharedKeyCredential, StorageError};
    use imgdrop_core::upload::{ImageUploadService, UploadPolicy};
    use imgdrop_shared::{StorageConfig, StorageProvider};
    use tower::ServiceExt;

    use super::*;

    struct NoopSink;

    #[async_trait]
    impl BlobSink for NoopSink {
        async fn put(
            &self,
            _locator: &BlobLocator,
            _credential: &SharedKeyCredential<'_>,
            _body: Bytes,
        ) -> Result<(), StorageError> {
            Ok(())
        }
    }

    async fn get_health(config: StorageConfig) -> (StatusCode, serde_json::Value) {
        let uploads = ImageUploadService::new(
            Arc::new(config),
            Arc::new(NoopSink),
            UploadPolicy::default(),
        );
        let state = AppState {
            uploads: Arc::new(uploads),
        };

        let response = routes()
            .with_state(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_with_complete_storage() {
        let (status, json) = get_health(StorageConfig::new("photosacct", "a2V5", "images")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["storage"]["provider"], "azure_blob");
        assert_eq!(json["storage"]["credentials"], true);
        assert_eq!(json["storage"]["container"], true);
    }

    #[tokio::test]
    async fn test_health_degraded_without_key() {
        let config = StorageConfig::new("devacct", "", "images")
            .with_provider(StorageProvider::local_fs("./storage"));
        let (status, json) = get_health(config).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["storage"]["provider"], "local");
        assert_eq!(json["storage"]["credentials"], false);
        assert_eq!(json["storage"]["container"], true);
    }
}
