//! Shared utilities.

pub mod retry;

pub use retry::{RetryExhausted, RetryPolicy};
