//! Blob uploader: builds the destination and hands the bytes to the sink.

use std::sync::Arc;

use bytes::Bytes;
use imgdrop_shared::StorageConfig;

use super::error::StorageError;
use super::locator::{BlobLocator, SharedKeyCredential};
use super::sink::BlobSink;

/// Uploads images into the configured container.
pub struct BlobUploader {
    config: Arc<StorageConfig>,
    sink: Arc<dyn BlobSink>,
}

impl BlobUploader {
    /// Create an uploader over a read-only storage configuration.
    #[must_use]
    pub fn new(config: Arc<StorageConfig>, sink: Arc<dyn BlobSink>) -> Self {
        Self { config, sink }
    }

    /// Destination of `file_name` in the image container.
    #[must_use]
    pub fn locator_for(&self, file_name: &str) -> BlobLocator {
        BlobLocator::new(
            self.config.account_name.as_str(),
            self.config.image_container.as_str(),
            file_name,
        )
    }

    /// Write `body` as `file_name`, replacing any object of the same name.
    ///
    /// Returns `true` once the sink accepted the whole object.
    ///
    /// # Errors
    ///
    /// Any sink failure (rejected credentials, missing container, network)
    /// is returned unchanged.
    pub async fn upload_image(&self, body: Bytes, file_name: &str) -> Result<bool, StorageError> {
        let locator = self.locator_for(file_name);
        locator.check_name()?;
        let credential =
            SharedKeyCredential::new(&self.config.account_name, &self.config.account_key);

        self.sink.put(&locator, &credential, body).await?;
        Ok(true)
    }

    /// The storage configuration this uploader writes with.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use secrecy::ExposeSecret;

    use super::*;

    #[derive(Default)]
    struct CapturingSink {
        calls: Mutex<Vec<(BlobLocator, String, String, Bytes)>>,
        fail: bool,
    }

    #[async_trait]
    impl BlobSink for CapturingSink {
        async fn put(
            &self,
            locator: &BlobLocator,
            credential: &SharedKeyCredential<'_>,
            body: Bytes,
        ) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::PermissionDenied("signature mismatch".into()));
            }
            self.calls.lock().unwrap().push((
                locator.clone(),
                credential.account_name.to_string(),
                credential.account_key.expose_secret().to_string(),
                body,
            ));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_upload_builds_locator_and_credential() {
        let sink = Arc::new(CapturingSink::default());
        let config = Arc::new(StorageConfig::new("photosacct", "a2V5", "images"));
        let uploader = BlobUploader::new(config, sink.clone());

        let uploaded = uploader
            .upload_image(Bytes::from_static(b"jpeg"), "cat.jpg")
            .await
            .expect("upload should succeed");
        assert!(uploaded);

        let calls = sink.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (locator, account, key, body) = &calls[0];
        assert_eq!(locator, &BlobLocator::new("photosacct", "images", "cat.jpg"));
        assert_eq!(account, "photosacct");
        assert_eq!(key, "a2V5");
        assert_eq!(body.as_ref(), b"jpeg");
    }

    #[tokio::test]
    async fn test_sink_failure_propagates() {
        let sink = Arc::new(CapturingSink {
            fail: true,
            ..CapturingSink::default()
        });
        let config = Arc::new(StorageConfig::new("photosacct", "a2V5", "images"));
        let uploader = BlobUploader::new(config, sink);

        let err = uploader
            .upload_image(Bytes::from_static(b"jpeg"), "cat.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn test_escaping_file_name_never_reaches_sink() {
        let sink = Arc::new(CapturingSink::default());
        let config = Arc::new(StorageConfig::new("photosacct", "a2V5", "images"));
        let uploader = BlobUploader::new(config, sink.clone());

        let err = uploader
            .upload_image(Bytes::from_static(b"jpeg"), "../other/cat.jpg")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidBlobName(_)));
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_locator_for() {
        let config = Arc::new(StorageConfig::new("photosacct", "a2V5", "images"));
        let uploader = BlobUploader::new(config, Arc::new(CapturingSink::default()));
        assert_eq!(
            uploader.locator_for("dog.png").url(),
            "https://photosacct.blob.core.windows.net/images/dog.png"
        );
    }
}
