//! # credplane
//!
//! A small HTTP service that stores connection credentials across two
//! backends: non-secret metadata (host, port, username) in PostgreSQL and the
//! password in HashiCorp Vault (KV v2), linked by a server-generated id.
//!
//! ## Architecture
//!
//! ```text
//! HTTP API (axum) → ConnectionService → ConnectionRepository (sqlx / PostgreSQL)
//!                                     → ConnectionSecrets    (vaultrs / Vault KV v2)
//! ```
//!
//! Writes to the two stores are not atomic. A failed password write leaves
//! the metadata row in place; the error is logged with the connection id.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use credplane::{api::start_api_server, startup, Config, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let state = startup::initialize(&config).await?;
//!     start_api_server(&config.api, state.connection_service).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod secrets;
pub mod services;
pub mod startup;
pub mod storage;
pub mod utils;

// Re-export commonly used types and traits
pub use config::Config;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
