//! # Error Types
//!
//! Error types for the credplane service using `thiserror`.

use crate::secrets::SecretsError;

/// Custom result type for credplane operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the credplane service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input validation errors
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// A connection with this username already exists
    #[error("Username '{username}' already exists")]
    DuplicateUsername { username: String },

    /// Resource not found errors
    #[error("Resource not found: {resource_type} with ID '{id}'")]
    NotFound { resource_type: String, id: String },

    /// A backend could not be reached during startup, even after retrying
    #[error("{backend} unavailable after {attempts} attempt(s): {message}")]
    BackendUnavailable { backend: String, attempts: u32, message: String },

    /// Database and storage errors
    #[error("Database error: {context}")]
    Database {
        #[source]
        source: sqlx::Error,
        context: String,
    },

    /// Secret store errors
    #[error("Secret store error: {0}")]
    Secrets(#[from] SecretsError),

    /// A backend call exceeded its deadline
    #[error("Operation timed out: {operation} after {duration_ms}ms")]
    Timeout { operation: String, duration_ms: u64 },

    /// Network transport errors (HTTP listener)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create a duplicate username error
    pub fn duplicate_username<S: Into<String>>(username: S) -> Self {
        Self::DuplicateUsername { username: username.into() }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource_type: R, id: I) -> Self {
        Self::NotFound { resource_type: resource_type.into(), id: id.into() }
    }

    /// Create a backend unavailable error
    pub fn backend_unavailable<B: Into<String>, M: Into<String>>(
        backend: B,
        attempts: u32,
        message: M,
    ) -> Self {
        Self::BackendUnavailable { backend: backend.into(), attempts, message: message.into() }
    }

    /// Create a database error with context
    pub fn database<S: Into<String>>(source: sqlx::Error, context: S) -> Self {
        Self::Database { source, context: context.into() }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(operation: S, duration_ms: u64) -> Self {
        Self::Timeout { operation: operation.into(), duration_ms }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// True for failures of a backend mid-request (database, secret store, timeouts).
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Error::Database { .. } | Error::Secrets(_) | Error::Timeout { .. })
    }

    /// Get the HTTP status code that should be returned for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation { .. } => 400,
            Error::DuplicateUsername { .. } => 400,
            Error::NotFound { .. } => 404,
            Error::Config(_)
            | Error::BackendUnavailable { .. }
            | Error::Database { .. }
            | Error::Secrets(_)
            | Error::Timeout { .. }
            | Error::Transport(_)
            | Error::Internal(_) => 500,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(error: sqlx::Error) -> Self {
        Self::Database { source: error, context: "Database operation failed".to_string() }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let message = fields
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        match fields.as_slice() {
            [(field, _)] => Self::validation_field(message, field.to_string()),
            _ => Self::validation(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Target {
        #[validate(range(min = 1, max = 65535, message = "Port must be between 1 and 65535"))]
        port: u32,
        #[validate(length(min = 1, message = "Host cannot be empty"))]
        host: String,
    }

    #[test]
    fn test_error_creation() {
        let error = Error::config("Test configuration error");
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(error.to_string(), "Configuration error: Test configuration error");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::validation("test").status_code(), 400);
        assert_eq!(Error::duplicate_username("alice").status_code(), 400);
        assert_eq!(Error::not_found("connection", "x").status_code(), 404);
        assert_eq!(Error::timeout("secret read", 5000).status_code(), 500);
        assert_eq!(Error::backend_unavailable("secret store", 8, "refused").status_code(), 500);
        assert_eq!(Error::internal("test").status_code(), 500);
    }

    #[test]
    fn test_backend_error_classification() {
        assert!(Error::timeout("insert", 10).is_backend_error());
        assert!(Error::Secrets(SecretsError::backend_error("boom")).is_backend_error());
        assert!(!Error::not_found("connection", "x").is_backend_error());
        assert!(!Error::duplicate_username("alice").is_backend_error());
    }

    #[test]
    fn test_backend_unavailable_display() {
        let error = Error::backend_unavailable("relational store", 8, "connection refused");
        assert_eq!(
            error.to_string(),
            "relational store unavailable after 8 attempt(s): connection refused"
        );
    }

    #[test]
    fn test_validation_errors_single_field_keeps_field_name() {
        let target = Target { port: 0, host: "db1".to_string() };
        let error: Error = target.validate().unwrap_err().into();
        match error {
            Error::Validation { message, field } => {
                assert_eq!(field.as_deref(), Some("port"));
                assert!(message.contains("Port must be between 1 and 65535"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors_multiple_fields_sorted() {
        let target = Target { port: 70000, host: String::new() };
        let error: Error = target.validate().unwrap_err().into();
        match error {
            Error::Validation { message, field } => {
                assert!(field.is_none());
                assert!(message.starts_with("host: Host cannot be empty"));
                assert!(message.contains("port: Port must be between 1 and 65535"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
