//! Upload batch orchestration.

use std::io::Cursor;
use std::sync::Arc;

use imgdrop_shared::{StorageConfig, UploadConfig};
use tracing::{info, warn};

use super::error::UploadError;
use super::types::{FileOutcome, SkipReason, UploadReport, UploadedFile};
use crate::imaging::{DimensionLimits, is_image, read_dimensions};
use crate::storage::{BlobSink, BlobUploader};

/// Validation rules applied to each file before upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadPolicy {
    /// Inclusive pixel bounds.
    pub limits: DimensionLimits,
    /// Decode headers and reject images outside `limits`.
    pub enforce_dimensions: bool,
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self {
            limits: DimensionLimits::new(config.max_width, config.max_height),
            enforce_dimensions: config.enforce_dimensions,
        }
    }
}

/// Validates uploaded files and forwards accepted images to storage.
pub struct ImageUploadService {
    uploader: BlobUploader,
    policy: UploadPolicy,
}

impl ImageUploadService {
    /// Create a new upload service.
    #[must_use]
    pub fn new(config: Arc<StorageConfig>, sink: Arc<dyn BlobSink>, policy: UploadPolicy) -> Self {
        Self {
            uploader: BlobUploader::new(config, sink),
            policy,
        }
    }

    /// The policy applied to every file.
    #[must_use]
    pub fn policy(&self) -> UploadPolicy {
        self.policy
    }

    /// The storage configuration uploads are written with.
    #[must_use]
    pub fn storage_config(&self) -> &StorageConfig {
        self.uploader.config()
    }

    /// Warnings about the batch size and storage configuration.
    ///
    /// None of these stop the batch.
    #[must_use]
    pub fn preflight(&self, file_count: usize) -> Vec<UploadError> {
        let config = self.uploader.config();
        let mut warnings = Vec::new();

        if file_count == 0 {
            warnings.push(UploadError::EmptyBatch);
        }
        if !config.has_credentials() {
            warnings.push(UploadError::MissingCredentials);
        }
        if !config.has_container() {
            warnings.push(UploadError::MissingContainer);
        }

        warnings
    }

    /// Process a batch: warn about configuration, then upload accepted images
    /// one after another.
    ///
    /// The first error stops the batch. Files already written stay written.
    pub async fn upload_batch(&self, files: &[UploadedFile]) -> UploadReport {
        let mut report = UploadReport::default();

        for warning in self.preflight(files.len()) {
            warn!(warning = %warning, "Upload precondition not met");
            report.push_message(warning.to_string());
        }

        if let Err(err) = self.process_files(files, &mut report).await {
            warn!(error = %err, "Upload batch stopped");
            report.push_message(err.to_string());
        }

        info!(
            files = files.len(),
            uploaded = report.uploaded_count(),
            messages = report.messages.len(),
            "Upload batch processed"
        );

        report
    }

    async fn process_files(
        &self,
        files: &[UploadedFile],
        report: &mut UploadReport,
    ) -> Result<(), UploadError> {
        for file in files {
            let outcome = match self.process_file(file).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    report.record(&file.file_name, FileOutcome::Failed);
                    return Err(err);
                }
            };

            info!(
                file_name = %file.file_name,
                bytes = file.len(),
                outcome = outcome.as_str(),
                "File processed"
            );

            if let FileOutcome::Skipped(SkipReason::TooLarge(dimensions)) = outcome {
                let warning = UploadError::TooLarge {
                    file_name: file.file_name.clone(),
                    dimensions,
                    limits: self.policy.limits,
                };
                report.push_message(warning.to_string());
            }

            report.record(&file.file_name, outcome);
        }

        Ok(())
    }

    async fn process_file(&self, file: &UploadedFile) -> Result<FileOutcome, UploadError> {
        if !is_image(&file.content_type, &file.file_name) {
            return Ok(FileOutcome::Skipped(SkipReason::NotAnImage));
        }
        if file.is_empty() {
            return Ok(FileOutcome::Skipped(SkipReason::Empty));
        }

        if self.policy.enforce_dimensions {
            let dimensions = read_dimensions(Cursor::new(file.content.as_ref()))
                .map_err(|e| UploadError::image_decode(&file.file_name, e))?;
            if !self.policy.limits.allows(dimensions) {
                return Ok(FileOutcome::Skipped(SkipReason::TooLarge(dimensions)));
            }
        }

        self.uploader
            .upload_image(file.content.clone(), &file.file_name)
            .await?;
        Ok(FileOutcome::Uploaded)
    }
}
