//! Connection repository: persistence of non-secret connection metadata.

use crate::domain::{ConnectionId, ConnectionRecord, NewConnection};
use crate::errors::{Error, Result};
use crate::storage::DbPool;
use async_trait::async_trait;
use sqlx::FromRow;
use tracing::instrument;
use uuid::Uuid;

/// PostgreSQL error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Database row for connections.
#[derive(Debug, Clone, FromRow)]
struct ConnectionRow {
    pub id: Uuid,
    pub host: String,
    pub port: i32,
    pub username: String,
}

impl TryFrom<ConnectionRow> for ConnectionRecord {
    type Error = Error;

    fn try_from(row: ConnectionRow) -> Result<Self> {
        let port = u16::try_from(row.port).map_err(|_| {
            Error::internal(format!("Stored port {} for connection {} is out of range", row.port, row.id))
        })?;

        Ok(ConnectionRecord {
            id: ConnectionId::from_uuid(row.id),
            host: row.host,
            port,
            username: row.username,
        })
    }
}

/// Repository trait for connection metadata.
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Allocate a new id and persist the connection.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateUsername`] if the username is taken; nothing is written in that case.
    async fn create(&self, connection: NewConnection) -> Result<ConnectionRecord>;

    /// Look up a connection by id.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no connection has this id.
    async fn get(&self, id: &ConnectionId) -> Result<ConnectionRecord>;
}

pub(crate) fn connection_not_found(id: &ConnectionId) -> Error {
    Error::not_found("Connection", id.to_string())
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

/// SQLx-based connection repository implementation.
#[derive(Debug, Clone)]
pub struct SqlxConnectionRepository {
    pool: DbPool,
}

impl SqlxConnectionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionRepository for SqlxConnectionRepository {
    #[instrument(skip(self, connection), fields(username = %connection.username, host = %connection.host), name = "db_create_connection")]
    async fn create(&self, connection: NewConnection) -> Result<ConnectionRecord> {
        let id = ConnectionId::new();

        // Dropping the transaction without commit rolls it back
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::database(e, "Failed to begin transaction"))?;

        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM connection WHERE username = $1")
            .bind(&connection.username)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| Error::database(e, "Failed to check username availability"))?;

        if existing.is_some() {
            tracing::info!(username = %connection.username, "Rejected duplicate username");
            return Err(Error::duplicate_username(connection.username));
        }

        let row = sqlx::query_as::<_, ConnectionRow>(
            r#"
            INSERT INTO connection (id, host, port, username)
            VALUES ($1, $2, $3, $4)
            RETURNING id, host, port, username
            "#,
        )
        .bind(id.as_uuid())
        .bind(&connection.host)
        .bind(i32::from(connection.port))
        .bind(&connection.username)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::info!(username = %connection.username, "Username taken by a concurrent insert");
                return Error::duplicate_username(connection.username.clone());
            }
            tracing::error!(error = %e, "Failed to insert connection");
            Error::database(e, "Failed to insert connection")
        })?;

        tx.commit().await.map_err(|e| Error::database(e, "Failed to commit connection insert"))?;

        let record = ConnectionRecord::try_from(row)?;
        tracing::info!(connection_id = %record.id, "Created connection record");
        Ok(record)
    }

    #[instrument(skip(self), fields(connection_id = %id), name = "db_get_connection")]
    async fn get(&self, id: &ConnectionId) -> Result<ConnectionRecord> {
        let row = sqlx::query_as::<_, ConnectionRow>(
            "SELECT id, host, port, username FROM connection WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::database(e, format!("Failed to get connection {}", id)))?;

        match row {
            Some(row) => ConnectionRecord::try_from(row),
            None => Err(connection_not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let id = Uuid::new_v4();
        let row = ConnectionRow {
            id,
            host: "db1".to_string(),
            port: 5432,
            username: "alice".to_string(),
        };
        let record = ConnectionRecord::try_from(row).unwrap();
        assert_eq!(record.id, ConnectionId::from_uuid(id));
        assert_eq!(record.port, 5432);
    }

    #[test]
    fn test_row_conversion_rejects_out_of_range_port() {
        let row = ConnectionRow {
            id: Uuid::new_v4(),
            host: "db1".to_string(),
            port: 70000,
            username: "alice".to_string(),
        };
        assert!(matches!(ConnectionRecord::try_from(row), Err(Error::Internal(_))));
    }

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
