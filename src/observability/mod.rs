//! # Observability Infrastructure
//!
//! Structured logging through `tracing`. HTTP request spans come from
//! `tower-http`'s `TraceLayer` in [`crate::api::routes`].

pub mod logging;

pub use logging::{build_env_filter, init_logging, log_config_info};
