//! In-memory [`ConnectionRepository`] for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::connection::{connection_not_found, ConnectionRepository};
use crate::domain::{ConnectionId, ConnectionRecord, NewConnection};
use crate::errors::{Error, Result};

/// Connection records held in process memory, cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnectionRepository {
    records: Arc<RwLock<HashMap<ConnectionId, ConnectionRecord>>>,
}

impl InMemoryConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn create(&self, connection: NewConnection) -> Result<ConnectionRecord> {
        // Check and insert under one write lock
        let mut records = self.records.write().await;

        if records.values().any(|r| r.username == connection.username) {
            return Err(Error::duplicate_username(connection.username));
        }

        let record = connection.into_record(ConnectionId::new());
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: &ConnectionId) -> Result<ConnectionRecord> {
        self.records.read().await.get(id).cloned().ok_or_else(|| connection_not_found(id))
    }
}
