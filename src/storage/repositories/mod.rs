//! Repository implementations for persisted entities.

pub mod connection;
pub mod memory;

pub use connection::{ConnectionRepository, SqlxConnectionRepository};
pub use memory::InMemoryConnectionRepository;
