//! Bounded fixed-delay retry used by the startup sequence.
//!
//! Only startup work is retried (backend connections and schema
//! initialization). Request-path operations surface failures immediately.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Retry policy: at most `max_attempts` tries with the same `delay` between them.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay slept between two consecutive attempts (no growth)
    pub delay: Duration,
    /// Description for logging purposes
    pub description: String,
}

/// Outcome of an exhausted retry loop.
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

impl RetryPolicy {
    /// A policy with a fixed delay. `max_attempts` of zero is treated as one.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), delay, description: "operation".to_string() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Run `f` until it succeeds or the attempts are used up.
    ///
    /// The delay is slept only between attempts, never after the last one.
    pub async fn run<F, Fut, T, E>(&self, mut f: F) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match f(attempt).await {
                Ok(value) => {
                    info!(
                        attempt,
                        description = %self.description,
                        "Succeeded on attempt {}",
                        attempt
                    );
                    return Ok(value);
                }
                Err(e) if attempt < max_attempts => {
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %e,
                        description = %self.description,
                        "Attempt failed, retrying"
                    );
                    sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(
                        attempt,
                        max_attempts,
                        error = %e,
                        description = %self.description,
                        "Retry exhausted all attempts"
                    );
                    return Err(RetryExhausted { attempts: attempt, last_error: e });
                }
            }
        }
    }
}
