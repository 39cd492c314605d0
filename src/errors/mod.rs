//! # Error Handling
//!
//! Crate-wide error type. Handlers convert it into HTTP responses through
//! [`crate::api::error::ApiError`]; startup errors bubble up to `main` and end
//! the process.

pub mod types;

pub use types::{Error, Result};
