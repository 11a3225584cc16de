//! Blob addressing and shared-key credentials.

use std::fmt;

use secrecy::SecretString;

use super::error::StorageError;

/// Address of a single blob: account, container and object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLocator {
    account: String,
    container: String,
    name: String,
}

impl BlobLocator {
    /// Create a locator.
    #[must_use]
    pub fn new(
        account: impl Into<String>,
        container: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            container: container.into(),
            name: name.into(),
        }
    }

    /// Storage account name.
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Container name.
    #[must_use]
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Object name inside the container.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reject object names that could resolve outside the container.
    ///
    /// Names must be non-empty, must not start with `/`, must not contain
    /// a backslash and must not have a `..` path segment.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidBlobName`] for any such name.
    pub fn check_name(&self) -> Result<(), StorageError> {
        let name = self.name.as_str();
        let escapes = name.is_empty()
            || name.starts_with('/')
            || name.contains('\\')
            || name.split('/').any(|segment| segment == "..");

        if escapes {
            return Err(StorageError::InvalidBlobName(self.name.clone()));
        }
        Ok(())
    }

    /// Public blob service endpoint of the account.
    #[must_use]
    pub fn default_endpoint(&self) -> String {
        format!("https://{}.blob.core.windows.net", self.account)
    }

    /// Full URL of the blob on the public endpoint.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/{}/{}", self.default_endpoint(), self.container, self.name)
    }
}

impl fmt::Display for BlobLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.account, self.container, self.name)
    }
}

/// Account name plus secret key used to sign storage requests.
#[derive(Debug)]
pub struct SharedKeyCredential<'a> {
    /// Storage account name.
    pub account_name: &'a str,
    /// Storage account key.
    pub account_key: &'a SecretString,
}

impl<'a> SharedKeyCredential<'a> {
    /// Borrow a credential from its parts.
    #[must_use]
    pub fn new(account_name: &'a str, account_key: &'a SecretString) -> Self {
        Self {
            account_name,
            account_key,
        }
    }
}
