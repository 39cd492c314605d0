//! # Storage and Persistence
//!
//! PostgreSQL connectivity, schema bootstrap and the connection repository.

pub mod pool;
pub mod repositories;
pub mod schema;

#[cfg(all(test, feature = "postgres_tests"))]
pub(crate) mod test_helpers;

pub use crate::config::DatabaseConfig;

pub use pool::{check_connection, connect_relational_store, create_pool, DbPool, RELATIONAL_STORE};
pub use repositories::{
    ConnectionRepository, InMemoryConnectionRepository, SqlxConnectionRepository,
};
pub use schema::ensure_schema;
