//! Domain layer
//!
//! Plain entities with no HTTP or database dependencies.
//!
//! - `id`: type-safe connection identifier
//! - `connection`: connection record, creation input and joined details

pub mod connection;
pub mod id;

pub use connection::{ConnectionDetails, ConnectionRecord, NewConnection};
pub use id::ConnectionId;
