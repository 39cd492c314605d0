//! Connection entities
//!
//! A connection is split across two stores: [`ConnectionRecord`] holds the
//! non-secret metadata kept in PostgreSQL, while the password lives in the
//! secret store under the same [`ConnectionId`].

use super::id::ConnectionId;
use crate::secrets::SecretString;

/// Non-secret connection metadata as persisted in the relational store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub id: ConnectionId,
    pub host: String,
    pub port: u16,
    pub username: String,
}

/// Metadata for a connection that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConnection {
    pub host: String,
    pub port: u16,
    pub username: String,
}

impl NewConnection {
    /// Attach a freshly allocated id
    pub fn into_record(self, id: ConnectionId) -> ConnectionRecord {
        ConnectionRecord { id, host: self.host, port: self.port, username: self.username }
    }
}

/// A connection with both halves joined back together
#[derive(Debug, Clone)]
pub struct ConnectionDetails {
    pub record: ConnectionRecord,
    pub password: SecretString,
}
