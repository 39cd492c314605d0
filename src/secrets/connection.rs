//! Connection password storage in the secret store.
//!
//! Each connection owns exactly one entry at `connection/<id>` holding a
//! single `password` field.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use super::client::SecretsClient;
use super::error::{Result, SecretsError};
use super::types::SecretString;
use crate::domain::ConnectionId;

const PASSWORD_FIELD: &str = "password";

/// Reads and writes connection passwords through a [`SecretsClient`].
#[derive(Clone)]
pub struct ConnectionSecrets {
    client: Arc<dyn SecretsClient>,
}

impl ConnectionSecrets {
    pub fn new(client: Arc<dyn SecretsClient>) -> Self {
        Self { client }
    }

    /// Secret path for a connection id.
    pub fn path_for(id: &ConnectionId) -> String {
        format!("connection/{}", id)
    }

    /// Store the password for `id`, replacing any previous value.
    #[instrument(skip(self, password), fields(connection_id = %id), name = "secrets_put_password")]
    pub async fn put(&self, id: &ConnectionId, password: &SecretString) -> Result<()> {
        let data = HashMap::from([(
            PASSWORD_FIELD.to_string(),
            password.expose_secret().to_string(),
        )]);
        self.client.write_secret(&Self::path_for(id), &data).await
    }

    /// Fetch the password for `id`.
    ///
    /// A missing entry and an entry without a `password` field are both
    /// reported as [`SecretsError::NotFound`].
    #[instrument(skip(self), fields(connection_id = %id), name = "secrets_get_password")]
    pub async fn get(&self, id: &ConnectionId) -> Result<SecretString> {
        let path = Self::path_for(id);
        let mut data = self.client.read_secret(&path).await?;

        data.remove(PASSWORD_FIELD).map(SecretString::from).ok_or_else(|| {
            tracing::warn!(path = %path, "Secret entry has no password field");
            SecretsError::not_found(path)
        })
    }
}

impl std::fmt::Debug for ConnectionSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSecrets").finish_non_exhaustive()
    }
}
