//! Upload orchestration for image batches.
//!
//! This module provides:
//! - Configuration preflight warnings
//! - Per-file classification and optional dimension checks
//! - Sequential upload to blob storage
//! - A per-file outcome report

mod error;
mod service;
mod types;

pub use error::UploadError;
pub use service::{ImageUploadService, UploadPolicy};
pub use types::{FileOutcome, FileReport, SkipReason, UploadReport, UploadedFile};
