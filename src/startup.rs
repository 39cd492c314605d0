//! Startup sequence for credplane
//!
//! Establishes both backends before the HTTP server accepts traffic:
//! - relational store: connect (retried per attempt) and create the schema,
//!   with the whole sequence retried as a unit
//! - secret store: build the Vault client and verify its token, retried
//!
//! Any exhausted retry loop is fatal.

use crate::config::{Config, StartupConfig, VaultConfig};
use crate::errors::{Error, Result};
use crate::secrets::{ConnectionSecrets, SecretsClient, VaultSecretsClient};
use crate::services::ConnectionService;
use crate::storage::{
    connect_relational_store, ensure_schema, DbPool, SqlxConnectionRepository, RELATIONAL_STORE,
};
use crate::utils::RetryPolicy;
use std::sync::Arc;
use tracing::info;

/// Name used for the secret store in logs and startup errors
pub const SECRET_STORE: &str = "secret store";

/// Handles shared by every request once startup succeeded.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub connection_service: Arc<ConnectionService>,
}

fn connect_policy(startup: &StartupConfig, backend: &str) -> RetryPolicy {
    RetryPolicy::fixed(startup.connect_max_attempts, startup.connect_retry_delay())
        .with_description(format!("connect to {}", backend))
}

fn init_policy(startup: &StartupConfig) -> RetryPolicy {
    RetryPolicy::fixed(startup.init_max_attempts, startup.init_retry_delay())
        .with_description("initialize relational store")
}

/// Build the Vault client and wait until it authenticates.
///
/// An invalid client configuration fails immediately; unreachable or
/// unauthenticated attempts are retried under `policy`.
pub async fn connect_secret_store(
    config: &VaultConfig,
    policy: &RetryPolicy,
) -> Result<VaultSecretsClient> {
    let client = VaultSecretsClient::new(config)?;

    policy.run(|_| client.verify_authenticated()).await.map_err(|exhausted| {
        Error::backend_unavailable(SECRET_STORE, exhausted.attempts, exhausted.last_error.to_string())
    })?;

    info!(address = %config.address, mount_path = %client.mount_path(), "Connected to secret store");
    Ok(client)
}

/// Connect to PostgreSQL and ensure the schema, retrying the pair as a unit.
pub async fn initialize_relational_store(config: &Config) -> Result<DbPool> {
    let connect = connect_policy(&config.startup, RELATIONAL_STORE);

    init_policy(&config.startup)
        .run(|_| async {
            let pool = connect_relational_store(&config.database, &connect).await?;
            ensure_schema(&pool).await?;
            Ok::<_, Error>(pool)
        })
        .await
        .map_err(|exhausted| match exhausted.last_error {
            err @ Error::BackendUnavailable { .. } => err,
            other => {
                Error::backend_unavailable(RELATIONAL_STORE, exhausted.attempts, other.to_string())
            }
        })
}

/// Bring up both backends and wire the connection service.
pub async fn initialize(config: &Config) -> Result<AppState> {
    let pool = initialize_relational_store(config).await?;

    let vault =
        connect_secret_store(&config.vault, &connect_policy(&config.startup, SECRET_STORE)).await?;
    let secrets: Arc<dyn SecretsClient> = Arc::new(vault);

    let connection_service = ConnectionService::new(
        Arc::new(SqlxConnectionRepository::new(pool.clone())),
        ConnectionSecrets::new(secrets),
        config.api.backend_timeout(),
    );

    Ok(AppState { pool, connection_service: Arc::new(connection_service) })
}
