//! Bounded-concurrency job runner with retry and exponential backoff.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per job, the first one included.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Delay after failed attempt number `attempt` (1-based): `base * 2^(attempt-1)`, capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError<E> {
    #[error("request queue is closed")]
    Closed,

    #[error("job failed after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: E },
}

#[derive(Debug, Clone)]
pub struct RequestQueue {
    permits: Arc<Semaphore>,
    policy: RetryPolicy,
}

impl RequestQueue {
    pub fn new(concurrency: usize, policy: RetryPolicy) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
            policy,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Free slots right now.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Reject every job submitted from now on.
    pub fn close(&self) {
        self.permits.close();
    }

    /// Run `job` once a slot is free, retrying failures per the policy.
    ///
    /// The slot is held for each attempt and given back during backoff.
    pub async fn run<F, Fut, T, E>(&self, job: F) -> Result<T, QueueError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        self.run_retrying_if(job, |_| true).await
    }

    /// Like [`run`](Self::run), but a failure is only retried when
    /// `retryable` accepts it. Other failures end the job at once.
    pub async fn run_retrying_if<F, Fut, T, E, R>(
        &self,
        mut job: F,
        retryable: R,
    ) -> Result<T, QueueError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        R: Fn(&E) -> bool,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = {
                let _permit = self
                    .permits
                    .acquire()
                    .await
                    .map_err(|_| QueueError::Closed)?;
                job().await
            };

            match result {
                Ok(value) => {
                    debug!(attempt, "Queued job succeeded");
                    return Ok(value);
                }
                Err(e) if attempt >= max_attempts || !retryable(&e) => {
                    warn!(attempt, error = %e, "Queued job failed, giving up");
                    return Err(QueueError::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                Err(e) => {
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        attempt,
                        error = %e,
                        retry_in_ms = delay.as_millis() as u64,
                        "Queued job failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new(4, RetryPolicy::default())
    }
}
