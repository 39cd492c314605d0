//! Test database utilities for in-library tests.
//!
//! Each `TestDatabase` starts a fresh PostgreSQL container through
//! Testcontainers with the connection schema applied. Requires Docker and the
//! `postgres_tests` feature.

use crate::config::DatabaseConfig;
use crate::storage::{create_pool, ensure_schema, DbPool};
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;

/// A test database backed by a Testcontainers PostgreSQL instance.
///
/// The container is removed when this struct is dropped, so keep it alive for
/// the duration of the test.
pub struct TestDatabase {
    pub pool: DbPool,
    _container: ContainerAsync<Postgres>,
}

impl TestDatabase {
    /// Start a container, connect to it and create the schema.
    /// `prefix` only labels panics.
    pub async fn new(prefix: &str) -> Self {
        let container = Postgres::default().start().await.unwrap_or_else(|e| {
            panic!("Failed to start PostgreSQL container for {}: {}", prefix, e)
        });

        let host = container
            .get_host()
            .await
            .unwrap_or_else(|e| panic!("Failed to get container host for {}: {}", prefix, e));

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .unwrap_or_else(|e| panic!("Failed to get container port for {}: {}", prefix, e));

        let config = DatabaseConfig {
            name: "postgres".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            host: host.to_string(),
            port,
            max_connections: 5,
            ..Default::default()
        };

        let pool = create_pool(&config)
            .await
            .unwrap_or_else(|e| panic!("Failed to connect to test database for {}: {}", prefix, e));

        ensure_schema(&pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to create schema for {}: {}", prefix, e));

        Self { pool, _container: container }
    }
}
