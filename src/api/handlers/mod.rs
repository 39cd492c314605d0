//! HTTP handlers

pub mod connections;
pub mod health;

pub use connections::{create_connection_handler, get_connection_handler};
pub use health::health_handler;
