//! Bounded exponential-backoff retry for startup-time operations.
//!
//! [`retry_with_backoff`] runs an operation up to
//! [`RetryPolicy::max_attempts`] times. Between attempts it sleeps for the
//! current backoff, then multiplies the backoff and adds a random jitter so
//! that many instances starting together do not reconnect in lockstep.
//! There is no sleep after the final failed attempt.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Tunable parameters for the backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay between the first and second attempt.
    pub initial_backoff: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: u32,
    /// Upper bound of the random offset added after each multiplication.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_secs(1),
            multiplier: 2,
            max_jitter: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            ..Default::default()
        }
    }
}

/// Calculate the next backoff: `current * multiplier + jitter`.
///
/// The jitter is added after the multiplication, never before.
pub fn next_backoff(current: Duration, policy: &RetryPolicy, jitter: Duration) -> Duration {
    current.saturating_mul(policy.multiplier).saturating_add(jitter)
}

/// Draw a uniformly random jitter in `[0, max]`.
pub fn random_jitter(max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=max_ms))
}

/// Run `op` until it succeeds or the attempts are exhausted.
///
/// `op` receives the 1-based attempt number. Every failure is logged with the
/// attempt number out of the maximum. Returns `None` once all attempts have
/// failed; with `max_attempts == 0` the operation is never invoked.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut op: F,
) -> Option<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts;
    let mut backoff = policy.initial_backoff;

    for attempt in 1..=max_attempts {
        match op(attempt).await {
            Ok(value) => return Some(value),
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "{operation} attempt {attempt}/{max_attempts} failed",
                );
            }
        }

        if attempt == max_attempts {
            break;
        }

        tracing::info!(
            delay_ms = backoff.as_millis() as u64,
            "Retrying {operation}",
        );
        tokio::time::sleep(backoff).await;
        backoff = next_backoff(backoff, policy, random_jitter(policy.max_jitter));
    }

    tracing::error!(max_attempts, "{operation} failed after all attempts");
    None
}
