//! Keyed operation locks.
//!
//! Guards against running the same long operation twice at once (a metadata
//! reload, a bulk document move). Locks expire after their timeout so a
//! crashed holder never blocks the key forever; an expired lock is taken
//! over by the next caller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LockError {
    #[error("operation '{key}' is already running (held by {holder})")]
    Held {
        key: String,
        holder: String,
        remaining: Duration,
    },

    #[error("operation '{key}' is not held by {holder}")]
    NotHolder { key: String, holder: String },
}

#[derive(Debug, Clone)]
struct LockEntry {
    holder: String,
    acquired_at: Instant,
    timeout: Duration,
}

impl LockEntry {
    fn remaining(&self, now: Instant) -> Duration {
        self.timeout
            .saturating_sub(now.saturating_duration_since(self.acquired_at))
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }
}

#[derive(Debug)]
pub struct OperationLockManager {
    locks: Mutex<HashMap<String, LockEntry>>,
    default_timeout: Duration,
}

impl OperationLockManager {
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            default_timeout,
        }
    }

    /// Take `key` for `holder` with the default timeout.
    pub fn try_acquire(&self, key: &str, holder: &str) -> Result<(), LockError> {
        self.try_acquire_with_timeout(key, holder, self.default_timeout)
    }

    /// Take `key` for `holder`.
    ///
    /// Fails with [`LockError::Held`] while any unexpired lock exists on the
    /// key, including one held by the same holder.
    pub fn try_acquire_with_timeout(
        &self,
        key: &str,
        holder: &str,
        timeout: Duration,
    ) -> Result<(), LockError> {
        let now = Instant::now();
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = locks.get(key) {
            if !existing.is_expired(now) {
                return Err(LockError::Held {
                    key: key.to_string(),
                    holder: existing.holder.clone(),
                    remaining: existing.remaining(now),
                });
            }
            warn!(
                lock.key = %key,
                lock.previous_holder = %existing.holder,
                lock.holder = %holder,
                "Taking over expired operation lock"
            );
        }

        locks.insert(
            key.to_string(),
            LockEntry {
                holder: holder.to_string(),
                acquired_at: now,
                timeout,
            },
        );
        debug!(lock.key = %key, lock.holder = %holder, "Operation lock acquired");
        Ok(())
    }

    /// Release `key`. Only the current holder may release it.
    pub fn release(&self, key: &str, holder: &str) -> Result<(), LockError> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        match locks.get(key) {
            Some(entry) if entry.holder == holder => {
                locks.remove(key);
                debug!(lock.key = %key, lock.holder = %holder, "Operation lock released");
                Ok(())
            }
            _ => Err(LockError::NotHolder {
                key: key.to_string(),
                holder: holder.to_string(),
            }),
        }
    }

    /// Whether an unexpired lock exists on `key`.
    pub fn is_locked(&self, key: &str) -> bool {
        let now = Instant::now();
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Acquire `key` and return a guard that releases it on drop.
    pub fn acquire_guard(
        self: &Arc<Self>,
        key: &str,
        holder: &str,
    ) -> Result<OperationGuard, LockError> {
        self.try_acquire(key, holder)?;
        Ok(OperationGuard {
            manager: Arc::clone(self),
            key: key.to_string(),
            holder: holder.to_string(),
        })
    }
}

impl Default for OperationLockManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Releases its lock when dropped.
#[derive(Debug)]
pub struct OperationGuard {
    manager: Arc<OperationLockManager>,
    key: String,
    holder: String,
}

impl OperationGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        // The lock may have expired and been taken over meanwhile.
        if let Err(e) = self.manager.release(&self.key, &self.holder) {
            debug!(error = %e, "Operation guard released nothing");
        }
    }
}
