//! # Configuration Settings
//!
//! Defines the configuration structure for the credplane service. Every
//! section has defaults suitable for local development (docker-compose host
//! names) and can be overridden through environment variables.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

/// Source of configuration values, keyed by environment variable name.
pub(crate) trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the real process environment.
pub(crate) struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

fn string_or(env: &dyn EnvSource, key: &str, default: &str) -> String {
    env.get(key).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
}

fn parse_or<T>(env: &dyn EnvSource, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env.get(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::config(format!("Invalid value for {}: {} ({})", key, raw, e))),
        None => Ok(default),
    }
}

fn bool_or(env: &dyn EnvSource, key: &str, default: bool) -> bool {
    env.get(key)
        .map(|v| {
            let v = v.trim();
            v.eq_ignore_ascii_case("true") || v == "1"
        })
        .unwrap_or(default)
}

/// HTTP API server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Bind address cannot be empty"))]
    pub bind_address: String,

    /// Server port
    #[validate(range(min = 1, max = 65535, message = "Port must be between 1 and 65535"))]
    pub port: u16,

    /// Deadline applied to each individual backend call made while serving a request
    #[validate(range(
        min = 1,
        max = 300,
        message = "Backend timeout must be between 1 and 300 seconds"
    ))]
    pub backend_timeout_seconds: u64,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), port: 8000, backend_timeout_seconds: 5 }
    }
}

impl ApiServerConfig {
    /// Get the server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the per-call backend timeout as Duration
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_seconds)
    }

    pub(crate) fn from_source(env: &dyn EnvSource) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            bind_address: string_or(env, "CREDPLANE_API_BIND_ADDRESS", &defaults.bind_address),
            port: parse_or(env, "CREDPLANE_API_PORT", defaults.port)?,
            backend_timeout_seconds: parse_or(
                env,
                "CREDPLANE_BACKEND_TIMEOUT_SECONDS",
                defaults.backend_timeout_seconds,
            )?,
        })
    }
}

/// Relational store (PostgreSQL) configuration
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// Database name
    #[validate(length(min = 1, message = "Database name cannot be empty"))]
    pub name: String,

    /// Database user
    #[validate(length(min = 1, message = "Database user cannot be empty"))]
    pub user: String,

    /// Database password
    pub password: String,

    /// Database host
    #[validate(length(min = 1, message = "Database host cannot be empty"))]
    pub host: String,

    /// Database port
    #[validate(range(min = 1, max = 65535, message = "Port must be between 1 and 65535"))]
    pub port: u16,

    /// Maximum number of connections in the pool
    #[validate(range(
        min = 1,
        max = 100,
        message = "Max connections must be between 1 and 100"
    ))]
    pub max_connections: u32,

    /// Connection timeout in seconds
    #[validate(range(
        min = 1,
        max = 60,
        message = "Connect timeout must be between 1 and 60 seconds"
    ))]
    pub connect_timeout_seconds: u64,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: "cogneotech".to_string(),
            user: "postgres".to_string(),
            password: "password".to_string(),
            host: "db".to_string(),
            port: 5432,
            max_connections: 10,
            connect_timeout_seconds: 10,
        }
    }
}

impl DatabaseConfig {
    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Connection target for logging, without credentials.
    pub fn display_target(&self) -> String {
        format!("postgresql://***:***@{}:{}/{}", self.host, self.port, self.name)
    }

    pub(crate) fn from_source(env: &dyn EnvSource) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            name: string_or(env, "POSTGRES_DB", &defaults.name),
            user: string_or(env, "POSTGRES_USER", &defaults.user),
            password: env.get("POSTGRES_PASSWORD").unwrap_or(defaults.password),
            host: string_or(env, "POSTGRES_HOST", &defaults.host),
            port: parse_or(env, "POSTGRES_PORT", defaults.port)?,
            max_connections: parse_or(env, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            connect_timeout_seconds: parse_or(
                env,
                "DATABASE_CONNECT_TIMEOUT_SECONDS",
                defaults.connect_timeout_seconds,
            )?,
        })
    }
}

/// Secret store (HashiCorp Vault) configuration
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct VaultConfig {
    /// Vault server address (e.g., "http://vault:8200")
    #[validate(length(min = 1, message = "Vault address cannot be empty"))]
    pub address: String,

    /// Vault authentication token
    pub token: String,

    /// Vault namespace (for Enterprise multi-tenancy)
    pub namespace: Option<String>,

    /// KV v2 mount path
    #[validate(length(min = 1, message = "Mount path cannot be empty"))]
    pub mount_path: String,
}

impl std::fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultConfig")
            .field("address", &self.address)
            .field("token", &"[REDACTED]")
            .field("namespace", &self.namespace)
            .field("mount_path", &self.mount_path)
            .finish()
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: "http://vault:8200".to_string(),
            token: "root".to_string(),
            namespace: None,
            mount_path: "secret".to_string(),
        }
    }
}

impl VaultConfig {
    /// Read `VAULT_ADDR`, `VAULT_TOKEN`, `VAULT_NAMESPACE` and
    /// `VAULT_MOUNT_PATH` (default: "secret").
    pub(crate) fn from_source(env: &dyn EnvSource) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            address: string_or(env, "VAULT_ADDR", &defaults.address),
            token: string_or(env, "VAULT_TOKEN", &defaults.token),
            namespace: env.get("VAULT_NAMESPACE").filter(|v| !v.trim().is_empty()),
            mount_path: string_or(env, "VAULT_MOUNT_PATH", &defaults.mount_path),
        })
    }
}

/// Retry settings for the startup sequence
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartupConfig {
    /// Attempts per backend when establishing the initial connection
    #[validate(range(min = 1, max = 1000, message = "Connect attempts must be between 1 and 1000"))]
    pub connect_max_attempts: u32,

    /// Fixed delay between connection attempts, in seconds
    pub connect_retry_delay_seconds: u64,

    /// Attempts of the whole relational initialization (connect + schema)
    #[validate(range(min = 1, max = 100, message = "Init attempts must be between 1 and 100"))]
    pub init_max_attempts: u32,

    /// Fixed delay between initialization attempts, in seconds
    pub init_retry_delay_seconds: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            connect_max_attempts: 8,
            connect_retry_delay_seconds: 5,
            init_max_attempts: 5,
            init_retry_delay_seconds: 5,
        }
    }
}

impl StartupConfig {
    pub fn connect_retry_delay(&self) -> Duration {
        Duration::from_secs(self.connect_retry_delay_seconds)
    }

    pub fn init_retry_delay(&self) -> Duration {
        Duration::from_secs(self.init_retry_delay_seconds)
    }

    pub(crate) fn from_source(env: &dyn EnvSource) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            connect_max_attempts: parse_or(
                env,
                "CREDPLANE_CONNECT_MAX_ATTEMPTS",
                defaults.connect_max_attempts,
            )?,
            connect_retry_delay_seconds: parse_or(
                env,
                "CREDPLANE_CONNECT_RETRY_DELAY_SECONDS",
                defaults.connect_retry_delay_seconds,
            )?,
            init_max_attempts: parse_or(
                env,
                "CREDPLANE_INIT_MAX_ATTEMPTS",
                defaults.init_max_attempts,
            )?,
            init_retry_delay_seconds: parse_or(
                env,
                "CREDPLANE_INIT_RETRY_DELAY_SECONDS",
                defaults.init_retry_delay_seconds,
            )?,
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logging: false }
    }
}

impl ObservabilityConfig {
    /// Create ObservabilityConfig from environment variables
    pub fn from_env() -> Self {
        Self::from_source(&ProcessEnv)
    }

    pub(crate) fn from_source(env: &dyn EnvSource) -> Self {
        let defaults = Self::default();
        Self {
            log_level: string_or(env, "CREDPLANE_LOG_LEVEL", &defaults.log_level),
            json_logging: bool_or(env, "CREDPLANE_LOG_JSON", defaults.json_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_database_defaults() {
        let config = DatabaseConfig::from_source(&env_of(&[])).unwrap();
        assert_eq!(config.name, "cogneotech");
        assert_eq!(config.user, "postgres");
        assert_eq!(config.password, "password");
        assert_eq!(config.host, "db");
        assert_eq!(config.port, 5432);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_overrides() {
        let env = env_of(&[
            ("POSTGRES_DB", "creds"),
            ("POSTGRES_USER", "svc"),
            ("POSTGRES_PASSWORD", "hunter2"),
            ("POSTGRES_HOST", "localhost"),
            ("POSTGRES_PORT", "6543"),
        ]);
        let config = DatabaseConfig::from_source(&env).unwrap();
        assert_eq!(config.name, "creds");
        assert_eq!(config.user, "svc");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 6543);
    }

    #[test]
    fn test_database_invalid_port_is_config_error() {
        let env = env_of(&[("POSTGRES_PORT", "not-a-port")]);
        let err = DatabaseConfig::from_source(&env).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("POSTGRES_PORT"));
    }

    #[test]
    fn test_database_debug_redacts_password() {
        let config = DatabaseConfig { password: "hunter2".to_string(), ..Default::default() };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(config.display_target(), "postgresql://***:***@db:5432/cogneotech");
    }

    #[test]
    fn test_vault_defaults_and_overrides() {
        let config = VaultConfig::from_source(&env_of(&[])).unwrap();
        assert_eq!(config.address, "http://vault:8200");
        assert_eq!(config.token, "root");
        assert_eq!(config.mount_path, "secret");
        assert!(config.namespace.is_none());

        let env = env_of(&[
            ("VAULT_ADDR", "http://127.0.0.1:8200"),
            ("VAULT_TOKEN", "s.abc"),
            ("VAULT_NAMESPACE", "team-a"),
            ("VAULT_MOUNT_PATH", "kv"),
        ]);
        let config = VaultConfig::from_source(&env).unwrap();
        assert_eq!(config.address, "http://127.0.0.1:8200");
        assert_eq!(config.token, "s.abc");
        assert_eq!(config.namespace.as_deref(), Some("team-a"));
        assert_eq!(config.mount_path, "kv");
        assert!(!format!("{:?}", config).contains("s.abc"));
    }

    #[test]
    fn test_startup_defaults() {
        let config = StartupConfig::from_source(&env_of(&[])).unwrap();
        assert_eq!(config.connect_max_attempts, 8);
        assert_eq!(config.connect_retry_delay(), Duration::from_secs(5));
        assert_eq!(config.init_max_attempts, 5);
        assert_eq!(config.init_retry_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_startup_zero_attempts_fails_validation() {
        let config = StartupConfig { connect_max_attempts: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_server_defaults() {
        let config = ApiServerConfig::from_source(&env_of(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.backend_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_observability_json_flag() {
        let config = ObservabilityConfig::from_source(&env_of(&[("CREDPLANE_LOG_JSON", "1")]));
        assert!(config.json_logging);
        assert_eq!(config.log_level, "info");

        let config = ObservabilityConfig::from_source(&env_of(&[("CREDPLANE_LOG_JSON", "no")]));
        assert!(!config.json_logging);
    }
}
