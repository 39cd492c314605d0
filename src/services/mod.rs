//! Business logic services
//!
//! Service layer components that encapsulate business logic, separated from
//! HTTP concerns.

pub mod connection;

pub use connection::ConnectionService;
