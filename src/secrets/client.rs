//! Core secrets client trait.

use async_trait::async_trait;
use std::collections::HashMap;

use super::error::Result;

/// Key/value payload stored at a single secret path.
pub type SecretData = HashMap<String, String>;

/// Trait for secret store backends.
///
/// Paths are relative to the backend's mount (for Vault KV v2, the part after
/// `<mount>/data/`). Writing a path replaces the whole payload stored there.
///
/// Implementations MUST NOT log secret values.
#[async_trait]
pub trait SecretsClient: Send + Sync {
    /// Read the latest payload stored at `path`.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::NotFound`](super::SecretsError::NotFound) if nothing is stored there
    /// - any other variant if the backend failed
    async fn read_secret(&self, path: &str) -> Result<SecretData>;

    /// Create or overwrite the payload stored at `path`.
    async fn write_secret(&self, path: &str, data: &SecretData) -> Result<()>;

    /// Check that the backend is reachable and the client credentials are accepted.
    async fn verify_authenticated(&self) -> Result<()>;
}
