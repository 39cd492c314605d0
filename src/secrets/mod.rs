//! # Secrets Management
//!
//! Access to the secret store that holds connection passwords.
//!
//! - [`SecretsClient`]: backend-agnostic read/write/auth-check seam
//! - [`VaultSecretsClient`]: HashiCorp Vault KV v2 via `vaultrs`
//! - [`InMemorySecretsClient`]: process-local store for tests and local runs
//! - [`ConnectionSecrets`]: password entries keyed by connection id
//!
//! Secret values are wrapped in [`SecretString`] and never logged.

pub mod client;
pub mod connection;
pub mod error;
pub mod memory;
pub mod types;
pub mod vault;

pub use client::{SecretData, SecretsClient};
pub use connection::ConnectionSecrets;
pub use error::{Result, SecretsError};
pub use memory::InMemorySecretsClient;
pub use types::SecretString;
pub use vault::VaultSecretsClient;
