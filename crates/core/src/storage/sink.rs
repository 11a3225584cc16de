//! Storage collaborator boundary and its Apache OpenDAL implementation.

use async_trait::async_trait;
use bytes::Bytes;
use imgdrop_shared::StorageProvider;
use opendal::{Operator, services};
use secrecy::ExposeSecret;
use tracing::debug;

use super::error::StorageError;
use super::locator::{BlobLocator, SharedKeyCredential};

/// Destination for uploaded bytes.
///
/// One capability only: a whole-object, non-resumable write. An existing
/// object with the same name is overwritten.
#[async_trait]
pub trait BlobSink: Send + Sync {
    /// Write `body` to `locator`, signing with `credential`.
    async fn put(
        &self,
        locator: &BlobLocator,
        credential: &SharedKeyCredential<'_>,
        body: Bytes,
    ) -> Result<(), StorageError>;
}

/// [`BlobSink`] backed by an OpenDAL operator built for each write.
///
/// The operator is derived from the locator and credential of the call, so
/// the sink itself holds no secrets.
#[derive(Debug, Clone)]
pub struct OpendalBlobSink {
    provider: StorageProvider,
}

impl OpendalBlobSink {
    /// Create a sink for the given provider.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self { provider }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Create OpenDAL operator scoped to the locator's container.
    fn create_operator(
        &self,
        locator: &BlobLocator,
        credential: &SharedKeyCredential<'_>,
    ) -> Result<Operator, StorageError> {
        match &self.provider {
            StorageProvider::AzureBlob { endpoint } => {
                let endpoint = endpoint
                    .clone()
                    .unwrap_or_else(|| locator.default_endpoint());
                let builder = services::Azblob::default()
                    .endpoint(&endpoint)
                    .account_name(credential.account_name)
                    .account_key(credential.account_key.expose_secret())
                    .container(locator.container());

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let root = root.join(locator.container());
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }
}

#[async_trait]
impl BlobSink for OpendalBlobSink {
    async fn put(
        &self,
        locator: &BlobLocator,
        credential: &SharedKeyCredential<'_>,
        body: Bytes,
    ) -> Result<(), StorageError> {
        locator.check_name()?;
        let operator = self.create_operator(locator, credential)?;

        debug!(
            provider = self.provider.name(),
            blob = %locator,
            bytes = body.len(),
            "Writing blob"
        );

        operator.write(locator.name(), body).await?;
        Ok(())
    }
}
