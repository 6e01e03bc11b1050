//! Retry logic with exponential backoff
//!
//! Provides configurable retry mechanism for failed task executions.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: usize,

    /// Initial delay before first retry (in seconds)
    pub initial_delay_secs: u64,

    /// Maximum delay between retries (in seconds)
    pub max_delay_secs: u64,

    /// Multiplier for exponential backoff (e.g., 2.0 for doubling)
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_secs: 1,
            max_delay_secs: 60,
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    pub fn new(max_retries: usize, initial_delay_secs: u64, max_delay_secs: u64, multiplier: f64) -> Self {
        Self {
            max_retries,
            initial_delay_secs,
            max_delay_secs,
            multiplier,
        }
    }

    /// Calculate delay for a given attempt number (0-indexed)
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        let delay_secs = (self.initial_delay_secs as f64) * self.multiplier.powi(attempt as i32);
        let capped_delay = delay_secs.min(self.max_delay_secs as f64);
        Duration::from_secs(capped_delay as u64)
    }
}

/// Execute a function with retry logic
///
/// # Arguments
/// * `config` - Retry configuration
/// * `task_id` - Task identifier for logging
/// * `operation` - Async function to execute
///
/// # Returns
/// Result of the operation after all retries exhausted or success
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    task_id: &str,
    mut operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let delay = config.calculate_delay(attempt - 1);
            debug!(
                task_id = %task_id,
                attempt = attempt,
                delay_secs = delay.as_secs(),
                "Retrying after delay"
            );
            sleep(delay).await;
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        task_id = %task_id,
                        attempt = attempt,
                        "Retry succeeded"
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                if attempt < config.max_retries {
                    warn!(
                        task_id = %task_id,
                        attempt = attempt + 1,
                        max_retries = config.max_retries,
                        error = %e,
                        "Operation failed, will retry"
                    );
                } else {
                    warn!(
                        task_id = %task_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Operation failed, max retries exhausted"
                    );
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap())
}
