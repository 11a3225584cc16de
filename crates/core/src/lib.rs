//! Core upload logic for imgdrop.
//!
//! This crate contains image validation and blob upload logic with ZERO web
//! dependencies.
//!
//! # Modules
//!
//! - `imaging` - Image classification and dimension checks
//! - `storage` - Blob locators, credentials and the storage sink
//! - `upload` - Batch orchestration and per-file outcomes

pub mod imaging;
pub mod storage;
pub mod upload;
