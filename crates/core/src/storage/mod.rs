//! Blob storage for uploaded images using Apache OpenDAL.
//!
//! Supported providers:
//! - Azure Blob Storage (shared-key credentials)
//! - Local filesystem (development only)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  locator + credential + bytes  ┌──────────────────┐
//! │ BlobUploader │ ─────────────────────────────▶ │ dyn BlobSink     │
//! └──────────────┘                                │ (OpendalBlobSink)│
//!                                                 └──────────────────┘
//!                                                   op.write(name, bytes)
//! ```

mod error;
mod locator;
mod sink;
mod uploader;

pub use error::StorageError;
pub use locator::{BlobLocator, SharedKeyCredential};
pub use sink::{BlobSink, OpendalBlobSink};
pub use uploader::BlobUploader;
