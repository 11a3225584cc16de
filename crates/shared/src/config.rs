//! Application configuration management.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::AppError;

/// Application configuration.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Blob storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Upload validation configuration.
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Storage provider the blob sink writes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// Azure Blob Storage
    AzureBlob {
        /// Blob service endpoint override (e.g. an Azurite emulator).
        /// Defaults to `https://{account}.blob.core.windows.net`.
        #[serde(default)]
        endpoint: Option<String>,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl Default for StorageProvider {
    fn default() -> Self {
        Self::AzureBlob { endpoint: None }
    }
}

impl StorageProvider {
    /// Create Azure Blob Storage provider with the public endpoint.
    #[must_use]
    pub fn azure_blob() -> Self {
        Self::default()
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Blob storage account configuration.
///
/// Every field defaults to empty so that an incomplete configuration is
/// reported on each upload request instead of failing at startup.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Storage account name.
    #[serde(default)]
    pub account_name: String,
    /// Storage account shared key.
    #[serde(default = "empty_secret")]
    pub account_key: SecretString,
    /// Container that receives uploaded images.
    #[serde(default)]
    pub image_container: String,
    /// Where blobs are written.
    #[serde(default)]
    pub provider: StorageProvider,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            account_name: String::new(),
            account_key: empty_secret(),
            image_container: String::new(),
            provider: StorageProvider::default(),
        }
    }
}

impl StorageConfig {
    /// Create a storage config for an Azure account.
    #[must_use]
    pub fn new(
        account_name: impl Into<String>,
        account_key: impl Into<String>,
        image_container: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            account_key: SecretString::from(account_key.into()),
            image_container: image_container.into(),
            provider: StorageProvider::default(),
        }
    }

    /// Set the storage provider.
    #[must_use]
    pub fn with_provider(mut self, provider: StorageProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Both the account name and the account key are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.account_name.is_empty() && !self.account_key.expose_secret().is_empty()
    }

    /// The image container is present.
    #[must_use]
    pub fn has_container(&self) -> bool {
        !self.image_container.is_empty()
    }
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

/// Upload validation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted image width in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,
    /// Maximum accepted image height in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,
    /// Reject images larger than `max_width` x `max_height` before upload.
    #[serde(default)]
    pub enforce_dimensions: bool,
    /// Maximum size of a whole multipart request body in bytes.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl UploadConfig {
    /// Default dimension bound for both axes.
    pub const DEFAULT_MAX_DIMENSION: u32 = 1024;
    /// Default request body limit: 10MB.
    pub const DEFAULT_MAX_REQUEST_BYTES: usize = 10 * 1024 * 1024;
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
            enforce_dimensions: false,
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

fn default_max_dimension() -> u32 {
    UploadConfig::DEFAULT_MAX_DIMENSION
}

fn default_max_request_bytes() -> usize {
    UploadConfig::DEFAULT_MAX_REQUEST_BYTES
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("IMGDROP").separator("__"))
            .build()
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Configuration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = temp_env::with_vars_unset(
            [
                "IMGDROP__STORAGE__ACCOUNT_NAME",
                "IMGDROP__STORAGE__ACCOUNT_KEY",
                "IMGDROP__STORAGE__IMAGE_CONTAINER",
            ],
            AppConfig::load,
        )
        .expect("empty configuration should load");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(!config.storage.has_credentials());
        assert!(!config.storage.has_container());
        assert_eq!(config.storage.provider, StorageProvider::azure_blob());
        assert_eq!(config.upload.max_width, 1024);
        assert_eq!(config.upload.max_height, 1024);
        assert!(!config.upload.enforce_dimensions);
    }

    #[test]
    fn test_storage_from_environment() {
        let config = temp_env::with_vars(
            [
                ("IMGDROP__STORAGE__ACCOUNT_NAME", Some("photosacct")),
                ("IMGDROP__STORAGE__ACCOUNT_KEY", Some("c2VjcmV0")),
                ("IMGDROP__STORAGE__IMAGE_CONTAINER", Some("images")),
                ("IMGDROP__UPLOAD__ENFORCE_DIMENSIONS", Some("true")),
            ],
            AppConfig::load,
        )
        .expect("configuration should load");

        assert_eq!(config.storage.account_name, "photosacct");
        assert_eq!(config.storage.account_key.expose_secret(), "c2VjcmV0");
        assert_eq!(config.storage.image_container, "images");
        assert!(config.upload.enforce_dimensions);
    }

    #[test]
    fn test_account_key_is_redacted_in_debug() {
        let config = StorageConfig::new("photosacct", "super-secret-key", "images");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-key"));
    }

    #[rstest]
    #[case("acct", "key", true)]
    #[case("", "key", false)]
    #[case("acct", "", false)]
    #[case("", "", false)]
    fn test_has_credentials(#[case] name: &str, #[case] key: &str, #[case] expected: bool) {
        let config = StorageConfig::new(name, key, "images");
        assert_eq!(config.has_credentials(), expected);
    }

    #[test]
    fn test_has_container() {
        assert!(StorageConfig::new("a", "k", "images").has_container());
        assert!(!StorageConfig::new("a", "k", "").has_container());
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(StorageProvider::azure_blob().name(), "azure_blob");
        assert_eq!(StorageProvider::local_fs("./storage").name(), "local");
    }
}
