//! In-memory [`SecretsClient`] backend.
//!
//! Suitable for tests and local development. Holds plaintext secrets in
//! process memory with no persistence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::client::{SecretData, SecretsClient};
use super::error::{Result, SecretsError};

/// Thread-safe in-memory secret store, cheap to clone.
#[derive(Clone, Default)]
pub struct InMemorySecretsClient {
    inner: Arc<RwLock<HashMap<String, SecretData>>>,
}

impl InMemorySecretsClient {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored paths.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl SecretsClient for InMemorySecretsClient {
    async fn read_secret(&self, path: &str) -> Result<SecretData> {
        self.inner.read().await.get(path).cloned().ok_or_else(|| SecretsError::not_found(path))
    }

    async fn write_secret(&self, path: &str, data: &SecretData) -> Result<()> {
        self.inner.write().await.insert(path.to_string(), data.clone());
        Ok(())
    }

    async fn verify_authenticated(&self) -> Result<()> {
        Ok(())
    }
}
