//! Relational schema bootstrap.

use crate::errors::{Error, Result};
use crate::storage::DbPool;

const CREATE_CONNECTION_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS connection (
        id UUID PRIMARY KEY,
        host VARCHAR(255) NOT NULL,
        port INT NOT NULL,
        username VARCHAR(255) NOT NULL UNIQUE
    )
"#;

/// Create the `connection` table if it does not exist yet. Safe to call repeatedly.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(CREATE_CONNECTION_TABLE)
        .execute(pool)
        .await
        .map_err(|e| Error::database(e, "Failed to create connection table"))?;

    tracing::info!("Connection table is ready");
    Ok(())
}
