//! # Structured Logging
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over
//! the configured level so operators can raise verbosity per module without
//! touching service configuration.

use crate::config::{Config, ObservabilityConfig};
use crate::errors::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` if set, otherwise the configured level.
pub fn build_env_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref(), config)
}

fn filter_from(rust_log: Option<&str>, config: &ObservabilityConfig) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| {
            Error::config(format!("Invalid {} '{}': {}", EnvFilter::DEFAULT_ENV, directives, e))
        }),
        None => EnvFilter::try_new(&config.log_level).map_err(|e| {
            Error::config(format!("Invalid log level '{}': {}", config.log_level, e))
        }),
    }
}

/// Install the global subscriber, plain text or JSON.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = build_env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json_logging {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::internal(format!("Failed to initialize logging: {}", e)))
}

/// Log configuration at startup. Credentials are never included.
pub fn log_config_info(config: &Config) {
    tracing::info!(
        server_address = %config.api.bind_addr(),
        database = %config.database.display_target(),
        vault_address = %config.vault.address,
        vault_mount = %config.vault.mount_path,
        backend_timeout_s = config.api.backend_timeout_seconds,
        connect_attempts = config.startup.connect_max_attempts,
        init_attempts = config.startup.init_max_attempts,
        json_logging = config.observability.json_logging,
        "credplane configuration"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn config(level: &str) -> ObservabilityConfig {
        ObservabilityConfig { log_level: level.to_string(), json_logging: false }
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        let result = filter_from(None, &config("credplane=loudest"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_rust_log_is_config_error() {
        let result = filter_from(Some("credplane=loudest"), &config("info"));
        match result {
            Err(Error::Config(message)) => assert!(message.contains("RUST_LOG")),
            other => panic!("expected config error, got {:?}", other.map(|f| f.to_string())),
        }
    }

    #[test]
    fn test_rust_log_overrides_configured_level() {
        let filter = filter_from(Some("credplane=trace"), &config("warn")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_valid_directive() {
        let config = ObservabilityConfig {
            log_level: "credplane=debug,sqlx=warn".to_string(),
            json_logging: true,
        };
        assert!(filter_from(None, &config).is_ok());
    }
}
