//! Shared configuration and errors for imgdrop.
//!
//! This crate provides common types used across all other crates:
//! - Layered configuration (files + `IMGDROP__*` environment variables)
//! - Application-wide error types

pub mod config;
pub mod error;

pub use config::{AppConfig, ServerConfig, StorageConfig, StorageProvider, UploadConfig};
pub use error::{AppError, AppResult};
