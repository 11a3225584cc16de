//! Upload error types.

use thiserror::Error;

use crate::imaging::{DimensionLimits, ImageDimensions};
use crate::storage::StorageError;

/// Everything that can go wrong while handling one upload batch.
///
/// `EmptyBatch`, `MissingCredentials`, `MissingContainer` and `TooLarge` are
/// collected as warnings; the remaining variants stop the batch.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request carried no files.
    #[error("No files were uploaded.")]
    EmptyBatch,

    /// Account name or key is not configured.
    #[error("No authentication provided")]
    MissingCredentials,

    /// Image container is not configured.
    #[error("No image container provided")]
    MissingContainer,

    /// The image exceeds the configured bounds and was not uploaded.
    #[error(
        "{file_name} is {}x{} pixels, larger than the maximum of {}x{}",
        .dimensions.width,
        .dimensions.height,
        .limits.max_width,
        .limits.max_height
    )]
    TooLarge {
        /// Name of the offending file.
        file_name: String,
        /// Decoded size.
        dimensions: ImageDimensions,
        /// Bounds that were exceeded.
        limits: DimensionLimits,
    },

    /// The storage collaborator failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The file is not a decodable image.
    #[error("could not decode image '{file_name}': {source}")]
    ImageDecode {
        /// Name of the offending file.
        file_name: String,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },
}

impl UploadError {
    /// Create an image decode error.
    #[must_use]
    pub fn image_decode(file_name: impl Into<String>, source: image::ImageError) -> Self {
        Self::ImageDecode {
            file_name: file_name.into(),
            source,
        }
    }

    /// Whether the error is a collected warning rather than a batch stopper.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::EmptyBatch
                | Self::MissingCredentials
                | Self::MissingContainer
                | Self::TooLarge { .. }
        )
    }
}
