//! Connection DTOs for API request/response handling

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{ConnectionDetails, ConnectionRecord, NewConnection};
use crate::errors::{Error, Result};
use crate::secrets::SecretString;

/// Request body for creating a connection
///
/// `port` is read as a wide integer so that out-of-range values reach field
/// validation (400) instead of failing deserialization (422).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateConnectionRequest {
    #[validate(length(min = 1, max = 255, message = "Host must be between 1 and 255 characters"))]
    pub host: String,

    #[validate(range(min = 1, max = 65535, message = "Port must be between 1 and 65535"))]
    pub port: i64,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Username must be between 1 and 255 characters"
    ))]
    pub username: String,

    pub password: SecretString,
}

impl CreateConnectionRequest {
    /// Validate, then split into the metadata and the password.
    pub fn into_parts(self) -> Result<(NewConnection, SecretString)> {
        self.validate()?;
        let port = u16::try_from(self.port)
            .map_err(|_| Error::validation_field("Port must be between 1 and 65535", "port"))?;

        let connection = NewConnection { host: self.host, port, username: self.username };
        Ok((connection, self.password))
    }
}

/// Response body for a created connection; never carries the password
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateConnectionResponse {
    pub id: String,
    pub host: String,
    pub port: u16,
    pub username: String,
}

impl From<ConnectionRecord> for CreateConnectionResponse {
    fn from(record: ConnectionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            host: record.host,
            port: record.port,
            username: record.username,
        }
    }
}

/// Response body for a fetched connection, including its password
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionDetailsResponse {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl From<ConnectionDetails> for ConnectionDetailsResponse {
    fn from(details: ConnectionDetails) -> Self {
        Self {
            host: details.record.host,
            port: details.record.port,
            username: details.record.username,
            password: details.password.expose_secret().to_string(),
        }
    }
}
