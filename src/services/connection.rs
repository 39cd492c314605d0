//! Connection business logic service
//!
//! Splits a connection across the two stores on create and joins the halves
//! back together on fetch. The two writes are independent: a failed secret
//! write leaves the already inserted record in place.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::{
    domain::{ConnectionDetails, ConnectionId, ConnectionRecord, NewConnection},
    errors::{Error, Result},
    secrets::{ConnectionSecrets, SecretString},
    storage::ConnectionRepository,
};

/// Service composing the connection repository and the password store
#[derive(Clone)]
pub struct ConnectionService {
    repository: Arc<dyn ConnectionRepository>,
    secrets: ConnectionSecrets,
    backend_timeout: Duration,
}

impl ConnectionService {
    /// Create a new connection service. `backend_timeout` bounds every
    /// individual backend call.
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        secrets: ConnectionSecrets,
        backend_timeout: Duration,
    ) -> Self {
        Self { repository, secrets, backend_timeout }
    }

    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.backend_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let duration_ms = self.backend_timeout.as_millis() as u64;
                warn!(operation, duration_ms, "Backend call timed out");
                Err(Error::timeout(operation, duration_ms))
            }
        }
    }

    /// Persist a new connection and store its password.
    ///
    /// Returns the stored record; the password is never part of the result.
    #[instrument(skip(self, connection, password), fields(username = %connection.username), name = "create_connection")]
    pub async fn create(
        &self,
        connection: NewConnection,
        password: SecretString,
    ) -> Result<ConnectionRecord> {
        let record = self.bounded("connection insert", self.repository.create(connection)).await?;

        let stored = self
            .bounded("password write", async {
                self.secrets.put(&record.id, &password).await.map_err(Error::from)
            })
            .await;

        if let Err(e) = stored {
            error!(
                connection_id = %record.id,
                error = %e,
                "Password was not stored; connection record exists without a secret entry"
            );
            return Err(e);
        }

        info!(connection_id = %record.id, host = %record.host, port = record.port, "Connection created");
        Ok(record)
    }

    /// Fetch a connection and its password.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] with resource type `Connection` when no record exists,
    /// or `Password` when the record exists but its secret entry does not.
    #[instrument(skip(self), fields(connection_id = %id), name = "fetch_connection")]
    pub async fn fetch(&self, id: &ConnectionId) -> Result<ConnectionDetails> {
        let record = self.bounded("connection lookup", self.repository.get(id)).await?;

        let password = self
            .bounded("password read", async {
                self.secrets.get(id).await.map_err(|e| {
                    if e.is_not_found() {
                        Error::not_found("Password", id.to_string())
                    } else {
                        Error::from(e)
                    }
                })
            })
            .await?;

        Ok(ConnectionDetails { record, password })
    }
}
