//! # Configuration Management
//!
//! Environment-driven configuration for the credplane service. The
//! relational store and secret store keep the variable names the deployment
//! already uses (`POSTGRES_*`, `VAULT_*`); service knobs use the
//! `CREDPLANE_` prefix.

pub mod settings;

pub use settings::{
    ApiServerConfig, DatabaseConfig, ObservabilityConfig, StartupConfig, VaultConfig,
};

use crate::errors::Result;
use settings::{EnvSource, ProcessEnv};
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiServerConfig,
    pub database: DatabaseConfig,
    pub vault: VaultConfig,
    pub startup: StartupConfig,
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(&ProcessEnv)
    }

    pub(crate) fn from_source(env: &dyn EnvSource) -> Result<Self> {
        let config = Self {
            api: ApiServerConfig::from_source(env)?,
            database: DatabaseConfig::from_source(env)?,
            vault: VaultConfig::from_source(env)?,
            startup: StartupConfig::from_source(env)?,
            observability: ObservabilityConfig::from_source(env),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.database.validate()?;
        self.vault.validate()?;
        self.startup.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}
