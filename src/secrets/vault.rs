//! HashiCorp Vault secrets backend implementation.
//!
//! Talks to Vault's KV v2 secrets engine through `vaultrs`. Constructing a
//! [`VaultSecretsClient`] performs no network call; startup calls
//! [`SecretsClient::verify_authenticated`] (token `lookup-self`) under its
//! retry policy before serving traffic.
//!
//! # Security
//!
//! - Tokens are never logged
//! - Secret payloads are never logged, only their paths

use async_trait::async_trait;
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::error::ClientError;
use vaultrs::kv2;

use super::client::{SecretData, SecretsClient};
use super::error::{Result, SecretsError};
use crate::config::VaultConfig;

/// HashiCorp Vault secrets backend client.
///
/// This client is `Send + Sync` and can be shared across request tasks.
pub struct VaultSecretsClient {
    client: VaultClient,
    address: String,
    mount_path: String,
}

impl std::fmt::Debug for VaultSecretsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSecretsClient")
            .field("address", &self.address)
            .field("mount_path", &self.mount_path)
            .finish()
    }
}

impl VaultSecretsClient {
    /// Creates a new Vault secrets client with the given configuration.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConfigError`] if the settings are rejected
    /// - [`SecretsError::ConnectionFailed`] if the HTTP client cannot be built
    pub fn new(config: &VaultConfig) -> Result<Self> {
        if config.address.is_empty() {
            return Err(SecretsError::config_error("Vault address cannot be empty"));
        }

        let mut settings_builder = VaultClientSettingsBuilder::default();
        settings_builder.address(&config.address).token(&config.token);

        if let Some(namespace) = config.namespace.clone() {
            settings_builder.namespace(Some(namespace));
        }

        let settings = settings_builder.build().map_err(|e| {
            SecretsError::config_error(format!("Invalid Vault configuration: {}", e))
        })?;

        let client = VaultClient::new(settings).map_err(|e| {
            SecretsError::connection_failed(format!("Failed to create Vault client: {}", e))
        })?;

        Ok(Self {
            client,
            address: config.address.clone(),
            mount_path: config.mount_path.clone(),
        })
    }

    /// KV v2 mount this client reads and writes under.
    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }
}

/// Classify a `vaultrs` failure for the given secret path.
fn map_client_error(error: ClientError, path: &str) -> SecretsError {
    match error {
        ClientError::APIError { code: 404, .. } => SecretsError::not_found(path),
        ClientError::APIError { code: code @ (401 | 403), errors } => {
            SecretsError::authentication_failed(format!("HTTP {}: {}", code, errors.join("; ")))
        }
        ClientError::APIError { code, errors } => {
            SecretsError::backend_error(format!("HTTP {}: {}", code, errors.join("; ")))
        }
        ClientError::RestClientError { source } => SecretsError::connection_failed(source.to_string()),
        other => SecretsError::backend_error(other.to_string()),
    }
}

#[async_trait]
impl SecretsClient for VaultSecretsClient {
    async fn read_secret(&self, path: &str) -> Result<SecretData> {
        kv2::read::<SecretData>(&self.client, &self.mount_path, path).await.map_err(|e| {
            let error = map_client_error(e, path);
            if error.is_not_found() {
                tracing::debug!(path = %path, mount_path = %self.mount_path, "Secret not present in Vault");
            } else {
                tracing::error!(error = %error, path = %path, "Failed to read secret from Vault");
            }
            error
        })
    }

    async fn write_secret(&self, path: &str, data: &SecretData) -> Result<()> {
        let metadata = kv2::set(&self.client, &self.mount_path, path, data).await.map_err(|e| {
            let error = map_client_error(e, path);
            tracing::error!(error = %error, path = %path, "Failed to write secret to Vault");
            error
        })?;

        tracing::debug!(
            path = %path,
            mount_path = %self.mount_path,
            version = metadata.version,
            "Stored secret in Vault"
        );
        Ok(())
    }

    async fn verify_authenticated(&self) -> Result<()> {
        vaultrs::token::lookup_self(&self.client).await.map_err(|e| match e {
            ClientError::APIError { code, errors } => SecretsError::authentication_failed(format!(
                "Vault rejected token lookup (HTTP {}): {}",
                code,
                errors.join("; ")
            )),
            other => map_client_error(other, "auth/token/lookup-self"),
        })?;

        tracing::debug!(address = %self.address, "Vault token is authenticated");
        Ok(())
    }
}
